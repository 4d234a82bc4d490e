use crate::attribute::TimeFormatAttrs;
use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{parse_macro_input, DeriveInput, Result};

mod attribute;

#[proc_macro_derive(TimeFormat, attributes(time_format))]
pub fn derive_time_format(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    derive_impl(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn derive_impl(input: DeriveInput) -> Result<proc_macro2::TokenStream> {
    let attrs = TimeFormatAttrs::parse_derive(&input.attrs)?;
    let Some(layout) = attrs.layout() else {
        return err(
            &input.ident,
            "missing #[time_format(layout = \"...\")] attribute",
        );
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    Ok(quote! {
        impl #impl_generics datestamp::TimeFormat for #ident #ty_generics #where_clause {
            const LAYOUT: &'static str = #layout;
        }
    })
}

pub(crate) fn error(spanned: &impl Spanned, s: &str) -> syn::Error {
    syn::Error::new(spanned.span(), s.to_owned())
}

pub(crate) fn err<T>(spanned: &impl Spanned, s: &str) -> Result<T> {
    Err(error(spanned, s))
}
