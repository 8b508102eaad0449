//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics that appear in visited fields. Skipped
//! fields contribute nothing.
//!
//! ## Opaque Wrappers
//!
//! `PhantomData<T>` and the std containers the walk never follows (`Option`,
//! `Box`, maps, sets, arrays) are skipped when collecting generics:
//!
//! ```ignore
//! struct Tagged<T> {
//!     #[sanitags("strip-all")]
//!     label: String,
//!     _marker: PhantomData<T>,  // T should NOT require SanitizeField
//! }
//! ```
//!
//! These implement `SanitizeField` for every `T`, so requiring a bound on
//! `T` would only reject valid uses. `Vec<T>` is not in this list: its impl
//! needs `T: SanitizeField` to tell string lists apart.

use syn::{parse_quote, Ident};

/// Type names whose `SanitizeField` impl places no bound on its arguments.
const UNBOUNDED_WRAPPERS: &[&str] = &[
    "PhantomData",
    "Option",
    "Box",
    "HashMap",
    "BTreeMap",
    "HashSet",
    "BTreeSet",
];

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    if let syn::Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            if UNBOUNDED_WRAPPERS.iter().any(|name| segment.ident == *name) {
                return;
            }

            if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
                for arg in &args.args {
                    if let syn::GenericArgument::Type(inner_ty) = arg {
                        collect_generics_from_type(inner_ty, generics, result);
                    }
                }
            }

            for param in generics.type_params() {
                if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
                    result.push(param.ident.clone());
                }
            }
        }
    }
}

/// Adds `SanitizeField` bounds to generic parameters used in visited fields.
pub(crate) fn add_field_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
    root: &proc_macro2::TokenStream,
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            param.bounds.push(parse_quote!(#root::SanitizeField));
        }
    }
    generics
}
