//! Derive macros for `sanitags`.
//!
//! This crate generates the traversal code behind `#[derive(Sanitize)]`. It:
//! - reads `#[sanitags(...)]` field and container attributes
//! - emits `Sanitize` and `SanitizeField` implementations that call into a
//!   policy resolver at run time
//!
//! It does **not** know what the policies do, and it does not validate policy
//! names: an unknown name is reported by the generated code when the field is
//! visited, exactly like a tagged field of the wrong type.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::TokenStream;
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod container;
mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
use container::{parse_container_options, ContainerOptions};
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_field_bounds;

/// Derives `sanitags::Sanitize` and `sanitags::SanitizeField` for structs and enums.
///
/// # Container Attributes
///
/// - `#[sanitags(crate = "path")]` - Reach the runtime crate through `path` instead of
///   `::sanitags`. Use this when the derive is invoked through a re-export.
///
/// # Field Attributes
///
/// - **No annotation**: The field is never sanitized. If its type derives `Sanitize`, the walk
///   recurses into it; every other type is left unchanged.
///
/// - `#[sanitags("strip-all")]`, `#[sanitags("safe-user-generated-content")]`: The field is
///   rewritten with the named policy. Works for `String`, `Cow<str>` and `Vec` of those; any other
///   type fails at run time with `InvalidPropertyType`. Any other policy string fails at run time
///   with `InvalidTagValue`.
///
/// - `#[sanitags(skip)]`: The field is left out of the traversal entirely and its type needs no
///   trait implementation. Use this for types from other crates.
///
/// Fields are visited in declaration order and the first error aborts the walk.
///
/// Unions are rejected at compile time.
#[proc_macro_derive(Sanitize, attributes(sanitags))]
pub fn derive_sanitize(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the sanitags crate root.
///
/// Handles crate renaming (e.g., `clean = { package = "sanitags", ... }`) and
/// explicit overrides via `#[sanitags(crate = "...")]`. Inside the sanitags
/// crate itself `::sanitags` resolves through its `extern crate self` alias.
fn crate_root(override_path: Option<&syn::Path>) -> TokenStream {
    if let Some(path) = override_path {
        return quote! { #path };
    }
    match crate_name("sanitags") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::sanitags },
    }
}

struct DeriveOutput {
    sanitize_body: TokenStream,
    used_generics: Vec<syn::Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        attrs,
        ..
    } = input;

    let ContainerOptions { crate_path } = parse_container_options(&attrs)?;
    let root = crate_root(crate_path.as_ref());

    let DeriveOutput {
        sanitize_body,
        used_generics,
    } = match &data {
        Data::Struct(data) => {
            let output = derive_struct(data, &generics, &root)?;
            DeriveOutput {
                sanitize_body: output.sanitize_body,
                used_generics: output.used_generics,
            }
        }
        Data::Enum(data) => {
            let output = derive_enum(data, &generics, &root)?;
            DeriveOutput {
                sanitize_body: output.sanitize_body,
                used_generics: output.used_generics,
            }
        }
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Sanitize` cannot be derived for unions",
            ));
        }
    };

    let bounded = add_field_bounds(generics, &used_generics, &root);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();

    Ok(quote! {
        impl #impl_generics #root::Sanitize for #ident #ty_generics #where_clause {
            fn sanitize_with<__SanitagsResolver>(
                &mut self,
                __sanitags_policies: &__SanitagsResolver,
            ) -> ::core::result::Result<(), #root::SanitizeError>
            where
                __SanitagsResolver: #root::PolicyResolver + ?::core::marker::Sized,
            {
                #sanitize_body
            }
        }

        impl #impl_generics #root::SanitizeField for #ident #ty_generics #where_clause {
            fn sanitize_untagged<__SanitagsResolver>(
                &mut self,
                __sanitags_policies: &__SanitagsResolver,
            ) -> ::core::result::Result<(), #root::SanitizeError>
            where
                __SanitagsResolver: #root::PolicyResolver + ?::core::marker::Sized,
            {
                #root::Sanitize::sanitize_with(self, __sanitags_policies)
            }
        }
    })
}
