//! Shared field visit logic for struct and enum derivation.

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote_spanned;

use crate::{generics::collect_generics_from_type, strategy::Strategy};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) root: &'a TokenStream,
    pub(crate) used_generics: &'a mut Vec<Ident>,
}

/// Generates the visit for a single field.
///
/// `place` evaluates to a `&mut` reference to the field value; `name` is the
/// field name reported in errors.
///
/// ## Field Visit Rules
///
/// | Annotation | Behavior |
/// |------------|----------|
/// | None | `SanitizeField::sanitize_untagged` (records recurse) |
/// | `#[sanitags("policy")]` | `SanitizeField::sanitize_tagged` with the literal |
/// | `#[sanitags(skip)]` | Nothing; no bounds collected |
pub(crate) fn generate_field_visit(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    place: &TokenStream,
    name: &str,
    span: Span,
    strategy: &Strategy,
) -> TokenStream {
    let root = ctx.root;

    match strategy {
        Strategy::Untagged => {
            collect_generics_from_type(ty, ctx.generics, ctx.used_generics);
            quote_spanned! { span =>
                #root::SanitizeField::sanitize_untagged(#place, __sanitags_policies)?;
            }
        }
        Strategy::Tagged(policy) => {
            collect_generics_from_type(ty, ctx.generics, ctx.used_generics);
            quote_spanned! { span =>
                #root::SanitizeField::sanitize_tagged(#place, #name, #policy, __sanitags_policies)?;
            }
        }
        Strategy::Skip => TokenStream::new(),
    }
}
