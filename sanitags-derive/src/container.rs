//! Container-level attribute parsing for `#[derive(Sanitize)]`.
//!
//! This module handles attributes on the struct/enum itself, not on fields.

use syn::{Attribute, LitStr, Meta, Result};

/// Options parsed from container-level `#[sanitags(...)]` attributes.
#[derive(Clone, Debug, Default)]
pub(crate) struct ContainerOptions {
    /// Path to the runtime crate, when it is not reachable as `::sanitags`.
    pub(crate) crate_path: Option<syn::Path>,
}

/// Parses container-level `#[sanitags(...)]` attributes.
pub(crate) fn parse_container_options(attrs: &[Attribute]) -> Result<ContainerOptions> {
    let mut options = ContainerOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("sanitags") {
            continue;
        }

        match &attr.meta {
            Meta::Path(path) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "bare #[sanitags] has no meaning on a container; declare policies on fields",
                ));
            }
            Meta::List(list) => {
                if syn::parse2::<LitStr>(list.tokens.clone()).is_ok() {
                    return Err(syn::Error::new_spanned(
                        list,
                        "policies are declared on fields, not on the container",
                    ));
                }
                list.parse_nested_meta(|meta| {
                    if meta.path.is_ident("crate") {
                        if options.crate_path.is_some() {
                            return Err(meta.error("duplicate `crate` option"));
                        }
                        let lit: LitStr = meta.value()?.parse()?;
                        options.crate_path = Some(lit.parse()?);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown container option `{}`; expected `crate`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
            }
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(
                    nv,
                    "name-value syntax is not supported for container-level #[sanitags]",
                ));
            }
        }
    }

    Ok(options)
}
