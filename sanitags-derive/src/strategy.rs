//! Parsing of `#[sanitags(...)]` field attributes.
//!
//! This module maps attribute syntax to traversal decisions and produces
//! structured errors for invalid forms. Policy strings are carried verbatim:
//! whether they name a known policy is decided at run time.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Ident, LitStr, Meta, Result};

/// Field traversal strategy based on `#[sanitags(...)]` attributes.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | Behavior |
/// |-----------|----------|----------|
/// | None | `Untagged` | Recurse into records, leave everything else |
/// | `#[sanitags("policy")]` | `Tagged("policy")` | Apply the policy or fail |
/// | `#[sanitags(skip)]` | `Skip` | Not visited at all |
#[derive(Clone, Debug)]
pub(crate) enum Strategy {
    /// No annotation.
    ///
    /// The field type must implement `SanitizeField`; derived records are
    /// walked, every other type is left unchanged.
    Untagged,
    /// `#[sanitags("policy")]`: the declared policy name, unvalidated.
    Tagged(LitStr),
    /// `#[sanitags(skip)]`: the field is invisible to the traversal.
    ///
    /// External types like `DateTime<Utc>` need this because they do not
    /// implement `SanitizeField`.
    Skip,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[sanitags] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("sanitags") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "bare #[sanitags] is not supported: declare a policy \
                    (e.g., #[sanitags(\"strip-all\")]) or use #[sanitags(skip)]",
                ));
            }
            Meta::List(list) => {
                if let Ok(policy) = syn::parse2::<LitStr>(list.tokens.clone()) {
                    set_strategy(&mut strategy, Strategy::Tagged(policy), attr.span())?;
                } else if let Ok(option) = syn::parse2::<Ident>(list.tokens.clone()) {
                    if option != "skip" {
                        return Err(syn::Error::new(
                            option.span(),
                            format!("unknown field option `{option}`; expected `skip`"),
                        ));
                    }
                    set_strategy(&mut strategy, Strategy::Skip, attr.span())?;
                } else {
                    return Err(syn::Error::new(
                        attr.span(),
                        "expected a policy name string (e.g., #[sanitags(\"strip-all\")]) or `skip`",
                    ));
                }
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[sanitags]; \
                    write #[sanitags(\"strip-all\")]",
                ));
            }
        }
    }

    Ok(strategy.unwrap_or(Strategy::Untagged))
}
