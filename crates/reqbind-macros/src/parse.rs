//! Parsing utilities for the binding derive.
//!
//! This module provides parsing for `#[bind(...)]` attributes and the
//! annotated struct.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Data, DeriveInput, Expr, ExprLit, Fields, Generics, Ident, Lit, Member, Meta, Token,
};

/// Parsed field-level `#[bind(...)]` attributes.
#[derive(Debug, Default)]
pub struct BindAttrs {
    /// The query key feeding the field.
    pub query: Option<String>,
    /// The path key feeding the field.
    pub path: Option<String>,
}

impl Parse for BindAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for (ident, value, span) in name_values(input)? {
            let slot = match ident.as_str() {
                "query" => &mut attrs.query,
                "path" => &mut attrs.path,
                _ => return Err(syn::Error::new(span, format!("unknown attribute: {ident}"))),
            };
            if slot.is_some() {
                return Err(syn::Error::new(span, format!("duplicate attribute: {ident}")));
            }
            if value.is_empty() {
                return Err(syn::Error::new(span, format!("{ident} key must not be empty")));
            }
            *slot = Some(value);
        }

        if attrs.query.is_none() && attrs.path.is_none() {
            return Err(syn::Error::new(
                Span::call_site(),
                "expected `query = \"...\"` and/or `path = \"...\"`",
            ));
        }

        Ok(attrs)
    }
}

/// Parsed struct-level `#[bind(...)]` attributes.
#[derive(Debug, Default)]
pub struct ContainerAttrs {
    /// Path to the `reqbind_extract` crate, when re-exported elsewhere.
    pub krate: Option<syn::Path>,
}

impl Parse for ContainerAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for (ident, value, span) in name_values(input)? {
            match ident.as_str() {
                "crate" => attrs.krate = Some(syn::parse_str(&value)?),
                _ => return Err(syn::Error::new(span, format!("unknown attribute: {ident}"))),
            }
        }

        Ok(attrs)
    }
}

/// Reads `name = "value"` pairs separated by commas.
fn name_values(input: ParseStream) -> syn::Result<Vec<(String, String, Span)>> {
    let meta_list: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

    meta_list
        .into_iter()
        .map(|meta| match meta {
            Meta::NameValue(nv) => {
                let ident = nv
                    .path
                    .get_ident()
                    .map(ToString::to_string)
                    .ok_or_else(|| syn::Error::new(nv.path.span(), "expected identifier"))?;

                let value = match &nv.value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) => s.value(),
                    _ => {
                        return Err(syn::Error::new(
                            nv.value.span(),
                            "expected string literal",
                        ))
                    }
                };

                Ok((ident, value, nv.path.span()))
            }
            _ => Err(syn::Error::new(meta.span(), "expected name = value")),
        })
        .collect()
}

/// A struct field that carries a `#[bind(...)]` attribute.
#[derive(Debug)]
pub struct BindField {
    /// How the field is accessed on `self`.
    pub member: Member,
    /// The field name reported in the field table.
    pub name: String,
    /// The parsed source keys.
    pub attrs: BindAttrs,
}

/// A parsed `#[derive(BindUrl)]` input.
#[derive(Debug)]
pub struct BindStruct {
    /// The struct name.
    pub ident: Ident,
    /// The struct generics.
    pub generics: Generics,
    /// Struct-level options.
    pub container: ContainerAttrs,
    /// Annotated fields, in declaration order.
    pub fields: Vec<BindField>,
}

impl BindStruct {
    /// Parses a `DeriveInput` into a `BindStruct`.
    pub fn parse(input: DeriveInput) -> syn::Result<Self> {
        let Data::Struct(data) = input.data else {
            return Err(syn::Error::new(
                input.ident.span(),
                "BindUrl can only be derived for structs",
            ));
        };

        let container = match input.attrs.iter().find(|a| a.path().is_ident("bind")) {
            Some(attr) => attr.parse_args()?,
            None => ContainerAttrs::default(),
        };

        let mut fields = Vec::new();
        let members: Vec<(Member, String, &syn::Field)> = match &data.fields {
            Fields::Named(named) => named
                .named
                .iter()
                .filter_map(|f| f.ident.as_ref().map(|id| (id, f)))
                .map(|(id, f)| (Member::Named(id.clone()), id.to_string(), f))
                .collect(),
            Fields::Unnamed(unnamed) => unnamed
                .unnamed
                .iter()
                .enumerate()
                .map(|(i, f)| (Member::from(i), i.to_string(), f))
                .collect(),
            Fields::Unit => Vec::new(),
        };

        for (member, name, field) in members {
            let mut bind_attrs = field.attrs.iter().filter(|a| a.path().is_ident("bind"));
            let Some(attr) = bind_attrs.next() else {
                continue;
            };
            if let Some(extra) = bind_attrs.next() {
                return Err(syn::Error::new(
                    extra.span(),
                    "only one #[bind(...)] attribute is allowed per field",
                ));
            }
            fields.push(BindField {
                member,
                name: name.trim_start_matches("r#").to_string(),
                attrs: attr.parse_args()?,
            });
        }

        Ok(Self {
            ident: input.ident,
            generics: input.generics,
            container,
            fields,
        })
    }
}
