//! `BindUrl` derive implementation.
//!
//! This module contains the core logic for expanding `#[derive(BindUrl)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::parse::BindStruct;

/// Expands the `#[derive(BindUrl)]` macro.
///
/// Generates a `BindUrl` impl with a constant field table and a `match`
/// from field index to `&mut self.<field>`.
pub fn expand_bind_url(input: TokenStream) -> syn::Result<TokenStream> {
    let input: DeriveInput = syn::parse2(input)?;
    let parsed = BindStruct::parse(input)?;

    Ok(generate_impl(&parsed))
}

fn generate_impl(parsed: &BindStruct) -> TokenStream {
    let ident = &parsed.ident;
    let (impl_generics, ty_generics, where_clause) = parsed.generics.split_for_impl();
    let krate = parsed
        .container
        .krate
        .as_ref()
        .map_or_else(|| quote! { ::reqbind_extract }, |path| quote! { #path });

    let field_entries = parsed.fields.iter().map(|field| {
        let name = &field.name;
        let query = field.attrs.query.as_ref().map(|key| quote! { .query(#key) });
        let path = field.attrs.path.as_ref().map(|key| quote! { .path(#key) });
        quote! { #krate::UrlField::new(#name) #query #path }
    });

    let target_arms = parsed.fields.iter().enumerate().map(|(index, field)| {
        let member = &field.member;
        quote! { #index => ::core::option::Option::Some(&mut self.#member), }
    });

    quote! {
        impl #impl_generics #krate::BindUrl for #ident #ty_generics #where_clause {
            fn url_fields() -> &'static [#krate::UrlField] {
                const FIELDS: &[#krate::UrlField] = &[#(#field_entries),*];
                FIELDS
            }

            fn url_target(
                &mut self,
                index: usize,
            ) -> ::core::option::Option<&mut dyn #krate::ParamTarget> {
                match index {
                    #(#target_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    }
}
