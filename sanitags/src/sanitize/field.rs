//! Field layer: how each field type behaves inside a record walk.
//!
//! The derive macro calls one of two methods per field:
//!
//! | Annotation | Generated call | Default behavior |
//! |------------|----------------|------------------|
//! | None | `sanitize_untagged` | Leave unchanged |
//! | `#[sanitags("policy")]` | `sanitize_tagged` | `InvalidPropertyType` |
//! | `#[sanitags(skip)]` | nothing | - |
//!
//! Text (`String`, `Cow<str>`) overrides `sanitize_tagged`; `Vec<T>` overrides
//! it when `T` is text; derived records override `sanitize_untagged` to recurse.
//! Every other implementation in this module keeps the defaults, which is what
//! makes a policy on a scalar, an `Option`, a map, or a list of non-strings a
//! structural error instead of a silent no-op.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    marker::PhantomData,
};

use crate::{
    error::SanitizeError,
    registry::{PolicyResolver, SanitizeFn},
};

/// How a value behaves when it is a field of a record being sanitized.
///
/// Implemented for text, lists, scalars and common std containers, and by
/// `#[derive(Sanitize)]` for records. Field types that do not implement it
/// must be marked `#[sanitags(skip)]`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be a field of a `Sanitize` record",
    label = "this field type does not implement `SanitizeField`",
    note = "derive `Sanitize` on `{Self}` if it is a record that should be walked",
    note = "or mark the field `#[sanitags(skip)]` to leave it out of the traversal"
)]
pub trait SanitizeField {
    /// `true` for string values a policy can be applied to directly.
    ///
    /// `Vec<T>` consults this before resolving anything, so a tagged list of
    /// non-strings fails even when it is empty.
    const TEXT: bool = false;

    /// Visits a field that declares no policy.
    ///
    /// Records recurse; everything else is left unchanged.
    fn sanitize_untagged<R>(&mut self, policies: &R) -> Result<(), SanitizeError>
    where
        R: PolicyResolver + ?Sized,
    {
        let _ = policies;
        Ok(())
    }

    /// Visits a field that declares the policy `tag`.
    ///
    /// `tag` is checked only after the type is known to accept a policy.
    fn sanitize_tagged<R>(
        &mut self,
        field: &'static str,
        tag: &str,
        policies: &R,
    ) -> Result<(), SanitizeError>
    where
        R: PolicyResolver + ?Sized,
    {
        let _ = (tag, policies);
        Err(SanitizeError::InvalidPropertyType { field })
    }

    /// Mutable access to the underlying string when `TEXT` is `true`.
    fn text_mut(&mut self) -> Option<&mut String> {
        None
    }
}

fn resolve_tag<R>(field: &'static str, tag: &str, policies: &R) -> Result<SanitizeFn, SanitizeError>
where
    R: PolicyResolver + ?Sized,
{
    policies
        .resolve_str(tag)
        .map_err(|err| err.on_field(field))
}

// =============================================================================
// Text leaves
// =============================================================================

impl SanitizeField for String {
    const TEXT: bool = true;

    fn sanitize_tagged<R>(
        &mut self,
        field: &'static str,
        tag: &str,
        policies: &R,
    ) -> Result<(), SanitizeError>
    where
        R: PolicyResolver + ?Sized,
    {
        let sanitize = resolve_tag(field, tag, policies)?;
        *self = sanitize(self.as_str());
        Ok(())
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        Some(self)
    }
}

impl SanitizeField for Cow<'_, str> {
    const TEXT: bool = true;

    fn sanitize_tagged<R>(
        &mut self,
        field: &'static str,
        tag: &str,
        policies: &R,
    ) -> Result<(), SanitizeError>
    where
        R: PolicyResolver + ?Sized,
    {
        let sanitize = resolve_tag(field, tag, policies)?;
        *self = Cow::Owned(sanitize(&**self));
        Ok(())
    }

    fn text_mut(&mut self) -> Option<&mut String> {
        Some(self.to_mut())
    }
}

// =============================================================================
// Lists
// =============================================================================

impl<T> SanitizeField for Vec<T>
where
    T: SanitizeField,
{
    /// Applies one resolved function to every element, in order.
    ///
    /// Nothing is mutated unless the element type is text and the policy
    /// resolves.
    fn sanitize_tagged<R>(
        &mut self,
        field: &'static str,
        tag: &str,
        policies: &R,
    ) -> Result<(), SanitizeError>
    where
        R: PolicyResolver + ?Sized,
    {
        if !T::TEXT {
            return Err(SanitizeError::InvalidPropertyType { field });
        }
        let sanitize = resolve_tag(field, tag, policies)?;
        for text in self.iter_mut().filter_map(T::text_mut) {
            *text = sanitize(text.as_str());
        }
        Ok(())
    }
}

// =============================================================================
// Opaque values: never followed, never sanitized
// =============================================================================

macro_rules! impl_sanitize_field_opaque {
    ($($ty:ty),* $(,)?) => {
        $(impl SanitizeField for $ty {})*
    };
}

impl_sanitize_field_opaque!(
    bool, char, (), i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl<T> SanitizeField for Option<T> {}

impl<T: ?Sized> SanitizeField for Box<T> {}

impl<T: ?Sized> SanitizeField for PhantomData<T> {}

impl<T, const N: usize> SanitizeField for [T; N] {}

impl<K, V, S> SanitizeField for HashMap<K, V, S> {}

impl<K, V> SanitizeField for BTreeMap<K, V> {}

impl<T, S> SanitizeField for HashSet<T, S> {}

impl<T> SanitizeField for BTreeSet<T> {}
