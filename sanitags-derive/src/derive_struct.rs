//! Struct-specific `Sanitize` derivation.
//!
//! Fields are reached through `&mut self.<member>`, so skipped fields need no
//! binding and named, tuple and unit structs share one code path.

use proc_macro2::{Ident, TokenStream};
use quote::quote;
use syn::{ext::IdentExt, spanned::Spanned, DataStruct, Member, Result};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field_visit, DeriveContext},
};

pub(crate) struct StructDeriveOutput {
    pub(crate) sanitize_body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
}

pub(crate) fn derive_struct(
    data: &DataStruct,
    generics: &syn::Generics,
    root: &TokenStream,
) -> Result<StructDeriveOutput> {
    let mut visits = Vec::new();
    let mut used_generics = Vec::new();

    let mut ctx = DeriveContext {
        generics,
        root,
        used_generics: &mut used_generics,
    };

    for (index, field) in data.fields.iter().enumerate() {
        let span = field.span();
        let strategy = parse_field_strategy(&field.attrs)?;
        let (member, name) = match &field.ident {
            Some(ident) => (Member::Named(ident.clone()), ident.unraw().to_string()),
            None => (Member::from(index), index.to_string()),
        };
        let place = quote! { &mut self.#member };

        visits.push(generate_field_visit(
            &mut ctx,
            &field.ty,
            &place,
            &name,
            span,
            &strategy,
        ));
    }

    Ok(StructDeriveOutput {
        sanitize_body: quote! {
            #(#visits)*
            ::core::result::Result::Ok(())
        },
        used_generics,
    })
}
