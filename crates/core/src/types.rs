use serde::{Deserialize, Serialize};

/// All backend primary keys are opaque strings (DRF UUIDs).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// A foreign-key reference that the backend serializes either as a bare
/// id string or as the populated object, depending on the endpoint.
///
/// Deserialization tries the object shape first so that payloads like
/// `{"category": {"id": "c1", ...}}` and `{"category": "c1"}` both work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ObjectOrId<T> {
    Object(T),
    Id(EntityId),
}

impl<T> ObjectOrId<T> {
    /// Extract the referenced id, whichever shape was sent.
    pub fn id<'a>(&'a self, id_of: impl Fn(&'a T) -> &'a str) -> &'a str {
        match self {
            ObjectOrId::Object(obj) => id_of(obj),
            ObjectOrId::Id(id) => id,
        }
    }

    /// The populated object, when the backend sent one.
    pub fn as_object(&self) -> Option<&T> {
        match self {
            ObjectOrId::Object(obj) => Some(obj),
            ObjectOrId::Id(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
    struct Named {
        id: String,
        name: String,
    }

    fn named_id(n: &Named) -> &str {
        &n.id
    }

    #[test]
    fn deserializes_bare_id() {
        let r: ObjectOrId<Named> = serde_json::from_str("\"c1\"").unwrap();
        assert_matches!(r, ObjectOrId::Id(_));
        assert_eq!(r.id(named_id), "c1");
        assert!(r.as_object().is_none());
    }

    #[test]
    fn deserializes_populated_object() {
        let r: ObjectOrId<Named> =
            serde_json::from_str(r#"{"id": "c1", "name": "Python"}"#).unwrap();
        assert_eq!(r.id(named_id), "c1");
        assert_eq!(r.as_object().unwrap().name, "Python");
    }
}
