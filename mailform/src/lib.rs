//! Client-side email composition: validate the fields of an outgoing email, gate an
//! optional attachment, and submit everything as one multipart POST.
//!
//! ```ignore
//! let config = ApiConfig::load()?;
//! let mut form = EmailForm::new(HttpMailApi::new(&config)?, Toaster::new());
//!
//! form.set_field(Field::From, "me@gmail.com");
//! form.set_field(Field::To, "you@gmail.com");
//! form.set_field(Field::Subject, "Hello");
//! form.set_field(Field::Text, "See attached.");
//! form.select_file("cv.pdf").await;
//!
//! match form.submit().await {
//!     SubmitOutcome::Sent(_) => {}
//!     SubmitOutcome::Invalid => println!("{:?}", form.errors()),
//!     SubmitOutcome::Failed(err) => log::debug!("{err}"),
//! }
//! ```

// Lets `#[derive(Notice)]` expand to `::mailform::..` paths inside this crate.
extern crate self as mailform;

pub use mailform_macros::Notice;

pub mod attachment;
pub mod config;
pub mod error;
pub mod form;
pub mod notify;
pub mod submit;
pub mod validate;

pub use attachment::{Attachment, AttachmentError};
pub use self::config::{ApiConfig, ConfigError, EnvConfig};
pub use error::SubmitError;
pub use form::{EmailForm, FormState, Phase, SubmissionStatus, SubmitOutcome};
pub use notify::{MemoryNotifier, Notice, NoticeKind, Notifier, Toaster};
pub use submit::{Delivery, HttpMailApi, MailApi, Payload};
pub use validate::{validate, ErrorMap, Field};
