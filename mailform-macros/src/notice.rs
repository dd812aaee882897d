use proc_macro::TokenStream;
use quote::quote;
use syn::parse::Parser;
use syn::{DeriveInput, Expr, Lit, Meta};

pub(crate) fn notice_derive_impl(input: DeriveInput) -> TokenStream {
    let name = &input.ident;
    let mut unit_variants = Vec::new();
    let mut tuple_variants = Vec::new();
    let mut struct_variants = Vec::new();

    let data_enum = match input.data {
        syn::Data::Enum(data_enum) => data_enum,
        _ => {
            return syn::Error::new_spanned(name, "Notice can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    for variant in data_enum.variants {
        let ident = variant.ident;
        let mut notice_kind = None;
        let mut notice_message = None;

        for attr in variant.attrs {
            if !attr.path().is_ident("notice") {
                continue;
            }
            if let Meta::List(meta_list) = &attr.meta {
                let parsed = syn::punctuated::Punctuated::<Expr, syn::Token![,]>::parse_terminated
                    .parse2(meta_list.tokens.clone());

                let args = match parsed {
                    Ok(args) => args,
                    Err(err) => return err.to_compile_error().into(),
                };

                for (i, expr) in args.into_iter().enumerate() {
                    match expr {
                        Expr::Path(path) if i == 0 => {
                            let kind = &path.path;
                            notice_kind = Some(quote! { ::mailform::NoticeKind::#kind });
                        }
                        Expr::Lit(lit) if i == 1 => {
                            if let Lit::Str(str_lit) = &lit.lit {
                                notice_message = Some(str_lit.value());
                            }
                        }
                        other => {
                            return syn::Error::new_spanned(
                                other,
                                "expected #[notice(Kind)] or #[notice(Kind, \"message\")]",
                            )
                            .to_compile_error()
                            .into();
                        }
                    }
                }
            }
        }

        let notice_kind =
            notice_kind.unwrap_or_else(|| quote! { ::mailform::NoticeKind::Error });

        match variant.fields {
            syn::Fields::Unit => {
                unit_variants.push((ident, notice_kind, notice_message));
            }
            syn::Fields::Unnamed(fields) => {
                tuple_variants.push((ident, notice_kind, notice_message, fields));
            }
            syn::Fields::Named(fields) => {
                struct_variants.push((ident, notice_kind, notice_message, fields));
            }
        }
    }

    let unit_kind_arms = unit_variants.iter().map(|(ident, kind, _)| {
        quote! {
            Self::#ident => #kind,
        }
    });

    let tuple_kind_arms = tuple_variants.iter().map(|(ident, kind, _, _)| {
        quote! {
            Self::#ident(..) => #kind,
        }
    });

    let struct_kind_arms = struct_variants.iter().map(|(ident, kind, _, _)| {
        quote! {
            Self::#ident { .. } => #kind,
        }
    });

    let unit_message_arms = unit_variants.iter().map(|(ident, _, message)| {
        let message_expr = match message {
            Some(msg) => quote! { #msg.to_string() },
            None => quote! { self.to_string() },
        };

        quote! {
            Self::#ident => #message_expr,
        }
    });

    let tuple_message_arms = tuple_variants.iter().map(|(ident, _, message, fields)| {
        let field_names: Vec<syn::Ident> = (0..fields.unnamed.len())
            .map(|i| syn::Ident::new(&format!("__self_{}", i), proc_macro2::Span::call_site()))
            .collect();

        let message_expr = match message {
            Some(msg) => {
                let msg = prefix_numbers_in_braces(msg);
                quote! { format!(#msg) }
            }
            None => quote! { self.to_string() },
        };

        quote! {
            #[allow(unused_variables)]
            Self::#ident(#(#field_names),*) => #message_expr,
        }
    });

    let struct_message_arms = struct_variants.iter().map(|(ident, _, message, fields)| {
        let field_names: Vec<&syn::Ident> = fields
            .named
            .iter()
            .filter_map(|f| f.ident.as_ref())
            .collect();

        let message_expr = match message {
            Some(msg) => quote! { format!(#msg) },
            None => quote! { self.to_string() },
        };

        quote! {
            #[allow(unused_variables)]
            Self::#ident { #(#field_names),* } => #message_expr,
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics #name #ty_generics #where_clause {
            pub fn notice_kind(&self) -> ::mailform::NoticeKind {
                match self {
                    #(#unit_kind_arms)*
                    #(#tuple_kind_arms)*
                    #(#struct_kind_arms)*
                }
            }

            pub fn notice_message(&self) -> String {
                match self {
                    #(#unit_message_arms)*
                    #(#tuple_message_arms)*
                    #(#struct_message_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Rewrites positional placeholders (`{0}`) to the bindings used in tuple arms (`{__self_0}`).
fn prefix_numbers_in_braces(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut just_opened = false;

    for c in input.chars() {
        if just_opened && c.is_ascii_digit() {
            result.push_str("__self_");
        }
        // `{{` is an escaped brace, not a placeholder
        just_opened = c == '{' && !just_opened;
        result.push(c);
    }

    result
}
