//! Two-state wrapper for partial-update payloads.
//!
//! A partial update must distinguish "field not present" (leave the stored
//! value alone) from "field present" (overwrite, including overwriting with
//! an explicit `null` for nullable fields). `Option<T>` cannot express both
//! at once, so update DTOs wrap each field in [`Patch`]:
//!
//! - non-nullable field: `Patch<String>` -- absent or a new value
//! - nullable field:     `Patch<Option<String>>` -- absent, `null`, or a value
//!
//! Deserialization maps any present JSON value (including `null`) to
//! [`Patch::Set`]; combined with `#[serde(default)]` on the DTO field, an
//! absent key becomes [`Patch::Unset`].

use serde::{Deserialize, Deserializer};

/// A field of a partial-update payload: either untouched or set to a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was absent from the payload; leave the stored value alone.
    #[default]
    Unset,
    /// The field was present; overwrite the stored value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns `true` if the field was present in the payload.
    pub fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Borrow the inner value, if set.
    pub fn as_ref(&self) -> Patch<&T> {
        match self {
            Self::Unset => Patch::Unset,
            Self::Set(v) => Patch::Set(v),
        }
    }

    /// Convert into an `Option`, losing the unset/set distinction.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Unset => None,
            Self::Set(v) => Some(v),
        }
    }

    /// Overwrite `slot` with the inner value when set; no-op when unset.
    pub fn apply_to(self, slot: &mut T) {
        if let Self::Set(v) = self {
            *slot = v;
        }
    }

    /// Map the inner value, preserving the unset/set state.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Unset => Patch::Unset,
            Self::Set(v) => Patch::Set(f(v)),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A present key always deserializes to Set; Unset only ever comes
        // from #[serde(default)] on the containing struct field.
        T::deserialize(deserializer).map(Patch::Set)
    }
}
