use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::borrow::Cow;
use thiserror::Error;

const USER_ID: &str = "user_id";

/// Why a JSON object cannot be taken as a customer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CustomerShapeError {
    #[error("missing field `user_id`")]
    MissingUserId,

    #[error("`user_id` is not an integer: {0}")]
    InvalidUserId(Value),
}

/// Customer record as read from the line-delimited source
///
/// The source object is kept whole, in source key order and with its
/// original JSON values, so writing a record back out reproduces what was
/// read. Only `user_id` is checked up front; `latitude` and `longitude` are
/// read by the proximity filter, and every other field is opaque.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct CustomerRecord {
    user_id: i64,
    fields: Map<String, Value>,
}

impl CustomerRecord {
    /// Build a record with text coordinates, the shape the source files use
    pub fn new(user_id: i64, name: &str, latitude: &str, longitude: &str) -> Self {
        let mut fields = Map::new();
        fields.insert(USER_ID.to_string(), Value::from(user_id));
        fields.insert("name".to_string(), Value::from(name));
        fields.insert("latitude".to_string(), Value::from(latitude));
        fields.insert("longitude".to_string(), Value::from(longitude));

        Self { user_id, fields }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// A field by name; JSON `null` reads as absent
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Display name: strings as-is, other values as JSON text, empty when absent
    pub fn display_name(&self) -> Cow<'_, str> {
        match self.field("name") {
            Some(Value::String(name)) => Cow::Borrowed(name.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
            None => Cow::Borrowed(""),
        }
    }
}

impl TryFrom<Map<String, Value>> for CustomerRecord {
    type Error = CustomerShapeError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let user_id = match fields.get(USER_ID) {
            None | Some(Value::Null) => return Err(CustomerShapeError::MissingUserId),
            Some(value) => value
                .as_i64()
                .ok_or_else(|| CustomerShapeError::InvalidUserId(value.clone()))?,
        };

        Ok(Self { user_id, fields })
    }
}

impl Serialize for CustomerRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Coerce a coordinate value to decimal degrees
///
/// Sources store degrees as JSON strings (`"53.2451022"`); plain JSON numbers
/// are accepted too. Anything else, or a non-finite number, gives `None`.
pub fn coordinate_degrees(value: &Value) -> Option<f64> {
    let degrees = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };

    degrees.is_finite().then_some(degrees)
}
