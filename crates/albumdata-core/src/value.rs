use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A dictionary node. Keys keep the order they had in the source document.
pub type Dictionary = IndexMap<String, Value>;

/// One node of a decoded property-list document.
///
/// The XML decoder lives outside this workspace; anything that can produce
/// this tree (including a JSON rendition through serde) can feed the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Real(f64),
    String(String),
    Array(Vec<Value>),
    Dictionary(Dictionary),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// An integer, an integral real such as `4.0`, or a numeric string.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::Real(r) if r.fract() == 0.0 && r.abs() < i64::MAX as f64 => Some(*r as i64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(r) => Some(*r),
            Value::Integer(i) => Some(*i as f64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            Value::Integer(i) => Some(*i != 0),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// View a dictionary node through the typed [`Record`] accessor.
    pub fn as_record(&self) -> Option<Record<'_>> {
        self.as_dictionary().map(Record::new)
    }

    /// Render a scalar the way it would appear as a dictionary key.
    pub fn as_token(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            _ => None,
        }
    }
}

/// Typed, read-only access to a single raw record.
///
/// Every getter returns `None` when the field is absent or has a shape that
/// cannot be read as the requested type; nothing here panics.
#[derive(Clone, Copy, Debug)]
pub struct Record<'a> {
    fields: &'a Dictionary,
}

impl<'a> Record<'a> {
    pub fn new(fields: &'a Dictionary) -> Self {
        Self { fields }
    }

    pub fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    pub fn str(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(Value::as_str)
    }

    /// A string or integer field rendered as a string. Used for fields whose
    /// type differs between producers, such as album type tokens.
    pub fn token(&self, key: &str) -> Option<String> {
        self.get(key).and_then(Value::as_token)
    }

    pub fn int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_integer)
    }

    /// A real, integer or numeric-string field. Blank strings read as absent.
    pub fn real(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_real)
    }

    pub fn bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn array(&self, key: &str) -> Option<&'a [Value]> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn record(&self, key: &str) -> Option<Record<'a>> {
        self.get(key).and_then(Value::as_record)
    }

    pub fn entries(self) -> impl Iterator<Item = (&'a str, &'a Value)> + 'a {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(json: serde_json::Value) -> Value {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn json_maps_onto_value_variants() {
        let v = value(serde_json::json!({
            "flag": true,
            "count": 3,
            "ratio": 0.5,
            "name": "Trip",
            "list": [1, "2"],
        }));
        let record = v.as_record().unwrap();
        assert_eq!(record.get("flag"), Some(&Value::Boolean(true)));
        assert_eq!(record.get("count"), Some(&Value::Integer(3)));
        assert_eq!(record.get("ratio"), Some(&Value::Real(0.5)));
        assert_eq!(record.str("name"), Some("Trip"));
        assert_eq!(record.array("list").map(<[Value]>::len), Some(2));
    }

    #[test]
    fn dictionary_keeps_document_order() {
        let v: Value = serde_json::from_str(r#"{"b": 1, "a": 2, "c": 3}"#).unwrap();
        let keys: Vec<&str> = v.as_record().unwrap().entries().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn token_renders_strings_and_integers() {
        let v = value(serde_json::json!({"s": "Regular", "n": 6, "r": 1.5}));
        let record = v.as_record().unwrap();
        assert_eq!(record.token("s").as_deref(), Some("Regular"));
        assert_eq!(record.token("n").as_deref(), Some("6"));
        assert_eq!(record.token("r"), None);
        assert_eq!(record.token("missing"), None);
    }

    #[test]
    fn numeric_getters_accept_strings() {
        let v = value(serde_json::json!({
            "id": "42",
            "lat": "47.5",
            "blank": "",
            "int_as_real": 7,
        }));
        let record = v.as_record().unwrap();
        assert_eq!(record.int("id"), Some(42));
        assert_eq!(record.real("lat"), Some(47.5));
        assert_eq!(record.real("blank"), None);
        assert_eq!(record.real("int_as_real"), Some(7.0));
    }

    #[test]
    fn integral_reals_read_as_integers() {
        let v = value(serde_json::json!({"whole": 4.0, "negative": -2.0, "half": 4.5}));
        let record = v.as_record().unwrap();
        assert_eq!(record.int("whole"), Some(4));
        assert_eq!(record.int("negative"), Some(-2));
        assert_eq!(record.int("half"), None);
        assert_eq!(Value::Real(f64::NAN).as_integer(), None);
        assert_eq!(Value::Real(f64::INFINITY).as_integer(), None);
        assert_eq!(Value::Real(1e300).as_integer(), None);
    }

    #[test]
    fn wrong_shapes_read_as_absent() {
        let v = value(serde_json::json!({"list": [1], "name": "x"}));
        let record = v.as_record().unwrap();
        assert_eq!(record.str("list"), None);
        assert!(record.array("name").is_none());
        assert!(record.record("name").is_none());
        assert_eq!(record.int("name"), None);
        assert!(Value::Integer(1).as_record().is_none());
    }
}
