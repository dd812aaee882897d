extern crate proc_macro;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod notice;

/// Derive macro for mapping error variants to a user-facing notice
///
/// Derive `Notice` by adding `#[notice(...)]` to each variant
///
/// `notice` accepts one or two arguments
/// - notice kind (required): `Success` or `Error`
/// - notice message (optional)
///
/// Variants without a `#[notice]` attribute are treated as `#[notice(Error)]`.
///
/// ### Notice Kind
///
/// Names a `mailform::NoticeKind` variant. It is returned by calling `notice_kind()`.
///
/// ### Notice Message
///
/// The notice message is a string literal which supports basic interpolation.
/// - Tuple variants can interpolate indices: `"first arg {0}, second arg {1}"`
/// - Struct variants can interpolate by field names: `"status was {status}"`
///
/// When not provided, the `Display` implementation is used. Pair it with `thiserror`
/// and only give a message when the text shown to the user should differ from the
/// text written to the log.
///
/// The notice message is returned by calling `notice_message()`.
///
/// ### Example
///
/// ```ignore
/// #[derive(Debug, thiserror::Error, mailform::Notice)]
/// enum UploadError {
///     // Display doubles as the notice text
///     #[error("upload rejected")]
///     #[notice(Error)]
///     Rejected,
///
///     // Hide transport details from the user
///     #[error("request failed: {0}")]
///     #[notice(Error, "Something went wrong.")]
///     Transport(#[from] reqwest::Error),
///
///     // Interpolating a struct field
///     #[error("file {name} is {size} bytes")]
///     #[notice(Error, "{name} is too large")]
///     TooLarge { name: String, size: u64 },
/// }
/// ```
#[proc_macro_derive(Notice, attributes(notice))]
pub fn notice_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    notice::notice_derive_impl(input)
}
