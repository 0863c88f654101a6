//! Store documents (floors, zones, seats, admins)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding a seat's occupancy flag
pub const OCCUPIED_FIELD: &str = "isOccupied";

/// A document read from one collection of the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identity within its collection
    pub id: String,
    /// Document payload
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Build a document from a JSON value; non-object payloads become empty.
    pub fn from_value(id: impl Into<String>, value: Value) -> Self {
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::new(id, fields)
    }

    /// Whether a seat document is marked occupied.
    ///
    /// Missing or null flags count as free; non-boolean flags count by
    /// truthiness.
    pub fn is_occupied(&self) -> bool {
        self.fields.get(OCCUPIED_FIELD).map(truthy).unwrap_or(false)
    }

    /// First present field among `keys`, rendered for display.
    pub fn display_field(&self, keys: &[&str]) -> Option<String> {
        keys.iter()
            .filter_map(|key| self.fields.get(*key))
            .find(|value| !value.is_null())
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    }

    /// Human label: `name`, `title`, `label` or the id.
    pub fn label(&self) -> String {
        self.display_field(&["name", "title", "label", "seatNumber", "email"])
            .unwrap_or_else(|| self.id.clone())
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Names of the store collections the dashboard reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionNames {
    pub floors: String,
    pub zones: String,
    pub seats: String,
    pub admins: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            floors: "floors".to_string(),
            zones: "zones".to_string(),
            seats: "seats".to_string(),
            admins: "admins".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seat(flag: Value) -> Document {
        Document::from_value("s1", json!({ "isOccupied": flag }))
    }

    #[test]
    fn test_occupancy_flag() {
        assert!(seat(json!(true)).is_occupied());
        assert!(!seat(json!(false)).is_occupied());
        assert!(!seat(Value::Null).is_occupied());
        assert!(!Document::from_value("s2", json!({})).is_occupied());
    }

    #[test]
    fn test_occupancy_truthiness() {
        assert!(seat(json!(1)).is_occupied());
        assert!(!seat(json!(0)).is_occupied());
        assert!(seat(json!("yes")).is_occupied());
        assert!(!seat(json!("")).is_occupied());
    }

    #[test]
    fn test_label_falls_back_to_id() {
        let doc = Document::from_value("zone-7", json!({ "floorId": "f1" }));
        assert_eq!(doc.label(), "zone-7");
        let named = Document::from_value("zone-8", json!({ "name": "Quiet Zone" }));
        assert_eq!(named.label(), "Quiet Zone");
    }
}
