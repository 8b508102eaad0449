//! Enum-specific `Sanitize` derivation.
//!
//! This module generates one match arm per variant. Only the fields of the
//! active variant are visited; skipped fields are not bound.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{ext::IdentExt, spanned::Spanned, DataEnum, Fields, Result};

use crate::{
    strategy::{parse_field_strategy, Strategy},
    transform::{generate_field_visit, DeriveContext},
};

pub(crate) struct EnumDeriveOutput {
    pub(crate) sanitize_body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
}

pub(crate) fn derive_enum(
    data: &DataEnum,
    generics: &syn::Generics,
    root: &TokenStream,
) -> Result<EnumDeriveOutput> {
    let mut arms = Vec::new();
    let mut used_generics = Vec::new();

    for variant in &data.variants {
        let mut ctx = DeriveContext {
            generics,
            root,
            used_generics: &mut used_generics,
        };
        let variant_ident = &variant.ident;

        let arm = match &variant.fields {
            Fields::Unit => quote! { Self::#variant_ident => {} },
            Fields::Named(fields) => {
                let mut bindings = Vec::new();
                let mut visits = Vec::new();
                for field in &fields.named {
                    let span = field.span();
                    let strategy = parse_field_strategy(&field.attrs)?;
                    if matches!(strategy, Strategy::Skip) {
                        continue;
                    }
                    let Some(ident) = field.ident.as_ref() else {
                        continue;
                    };
                    let place = quote! { #ident };
                    let name = ident.unraw().to_string();
                    visits.push(generate_field_visit(
                        &mut ctx, &field.ty, &place, &name, span, &strategy,
                    ));
                    bindings.push(ident);
                }
                quote! {
                    Self::#variant_ident { #(#bindings,)* .. } => {
                        #(#visits)*
                    }
                }
            }
            Fields::Unnamed(fields) => {
                let mut patterns = Vec::new();
                let mut visits = Vec::new();
                for (index, field) in fields.unnamed.iter().enumerate() {
                    let span = field.span();
                    let strategy = parse_field_strategy(&field.attrs)?;
                    if matches!(strategy, Strategy::Skip) {
                        patterns.push(quote! { _ });
                        continue;
                    }
                    let binding = format_ident!("__field_{}", index);
                    let place = quote! { #binding };
                    visits.push(generate_field_visit(
                        &mut ctx,
                        &field.ty,
                        &place,
                        &index.to_string(),
                        span,
                        &strategy,
                    ));
                    patterns.push(quote! { #binding });
                }
                quote! {
                    Self::#variant_ident( #(#patterns),* ) => {
                        #(#visits)*
                    }
                }
            }
        };
        arms.push(arm);
    }

    let sanitize_body = if arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#arms)*
            }
            ::core::result::Result::Ok(())
        }
    };

    Ok(EnumDeriveOutput {
        sanitize_body,
        used_generics,
    })
}
