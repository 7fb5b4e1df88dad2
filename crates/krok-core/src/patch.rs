//! Tri-state field wrapper for partial updates.
//!
//! A [`Patch<T>`] distinguishes a field that was left out of an update
//! payload from one that was supplied. Combined with `#[serde(default)]` on
//! the containing struct, a missing JSON key deserializes to
//! [`Patch::Absent`] and any present value to [`Patch::Set`].
//!
//! Nullable columns use `Patch<Option<T>>`: an explicit JSON `null` becomes
//! `Set(None)` and clears the stored value. For non-nullable fields an
//! explicit `null` fails to deserialize.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single field of a partial update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not supplied; the stored value is kept.
    Absent,
    /// The field was supplied with this value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns `true` if the field was not supplied.
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }

    /// Returns the supplied value, if any.
    pub fn as_set(&self) -> Option<&T> {
        match self {
            Patch::Set(value) => Some(value),
            Patch::Absent => None,
        }
    }

    /// Overwrites `target` with the supplied value. Leaves it untouched when
    /// the field is absent.
    pub fn apply_to(self, target: &mut T) {
        if let Patch::Set(value) = self {
            *target = value;
        }
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Absent
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Patch::Set(value),
            None => Patch::Absent,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

// Absent fields are expected to be skipped with
// `skip_serializing_if = "Patch::is_absent"`.
impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(value) => value.serialize(serializer),
            Patch::Absent => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, Serialize)]
    struct Sample {
        #[serde(default, skip_serializing_if = "Patch::is_absent")]
        name: Patch<String>,
        #[serde(default, skip_serializing_if = "Patch::is_absent")]
        note: Patch<Option<String>>,
    }

    #[test]
    fn missing_keys_are_absent() {
        let sample: Sample = serde_json::from_value(json!({})).unwrap();
        assert!(sample.name.is_absent());
        assert!(sample.note.is_absent());
    }

    #[test]
    fn explicit_null_clears_nullable_field() {
        let sample: Sample = serde_json::from_value(json!({ "note": null })).unwrap();
        assert_eq!(sample.note, Patch::Set(None));
    }

    #[test]
    fn explicit_null_rejected_for_required_field() {
        let result: Result<Sample, _> = serde_json::from_value(json!({ "name": null }));
        assert!(result.is_err());
    }

    #[test]
    fn apply_to_only_overwrites_when_set() {
        let mut target = "old".to_string();
        Patch::Absent.apply_to(&mut target);
        assert_eq!(target, "old");
        Patch::Set("new".to_string()).apply_to(&mut target);
        assert_eq!(target, "new");
    }

    #[test]
    fn absent_fields_are_skipped_on_serialize() {
        let sample = Sample {
            name: Patch::Set("a".into()),
            note: Patch::Absent,
        };
        assert_eq!(serde_json::to_value(&sample).unwrap(), json!({ "name": "a" }));
    }
}
