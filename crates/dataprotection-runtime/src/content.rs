//! # Content Sources
//!
//! A model is populated from *content*: anything that can answer "what is the value of this
//! property?". The [`Content`] trait is that single question, and the runtime ships three
//! sources that answer it:
//!
//! | Source | Built from | Lookup |
//! |--------|------------|--------|
//! | [`Dictionary`] | a string-keyed JSON map (hashtable-like input) | property name, ASCII case-insensitive, then serialized name |
//! | [`ShellObject`] | a tagged property bag piped between shell commands | same as `Dictionary` |
//! | [`WireObject`] | a JSON object received from the service | serialized name, exact |
//!
//! Values are handed to converters as a borrowed [`Raw`], which remembers which kind of source
//! it came from. That way a nested object inside a dictionary is read with dictionary rules,
//! and a nested object inside a wire payload is read with wire rules.

use crate::error::ConversionError;
use crate::model::Field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Which kind of source a [`Content`] reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Dictionary,
    ShellObject,
    Wire,
}

/// A borrowed, untyped value found in some content.
#[derive(Debug, Clone, Copy)]
pub enum Raw<'a> {
    /// A value from a wire payload (keys are serialized names).
    Wire(&'a Value),
    /// A value from a dictionary (keys are property names).
    Dictionary(&'a Value),
    /// A value from a shell property bag.
    Shell(&'a ShellValue),
}

impl<'a> Raw<'a> {
    /// The value as plain JSON, if it is not a shell object or shell list.
    pub fn as_value(&self) -> Option<&'a Value> {
        match *self {
            Raw::Wire(value) | Raw::Dictionary(value) => Some(value),
            Raw::Shell(ShellValue::Value(value)) => Some(value),
            Raw::Shell(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self.as_value(), Some(Value::Null))
    }

    /// Opens the value as content when it carries named properties.
    pub fn as_content(&self) -> Option<Box<dyn Content + 'a>> {
        match *self {
            Raw::Wire(Value::Object(map)) => Some(Box::new(WireObject::new(map))),
            Raw::Dictionary(Value::Object(map)) => Some(Box::new(Dictionary::new(map))),
            Raw::Shell(ShellValue::Object(object)) => Some(Box::new(object)),
            Raw::Shell(ShellValue::Value(Value::Object(map))) => {
                Some(Box::new(Dictionary::new(map)))
            }
            _ => None,
        }
    }

    /// Splits a sequence into its elements. A single non-sequence value is its own only element.
    pub fn elements(self) -> Vec<Raw<'a>> {
        match self {
            Raw::Wire(Value::Array(items)) => items.iter().map(Raw::Wire).collect(),
            Raw::Dictionary(Value::Array(items)) => items.iter().map(Raw::Dictionary).collect(),
            Raw::Shell(ShellValue::List(items)) => items.iter().map(Raw::Shell).collect(),
            Raw::Shell(ShellValue::Value(Value::Array(items))) => {
                items.iter().map(Raw::Dictionary).collect()
            }
            single => vec![single],
        }
    }

    /// Short human-readable description used in error messages.
    pub fn describe(&self) -> String {
        match *self {
            Raw::Shell(ShellValue::Object(object)) => match object.type_names.first() {
                Some(type_name) => format!("shell object {type_name}"),
                None => "shell object".to_string(),
            },
            Raw::Shell(ShellValue::List(_)) => "list".to_string(),
            Raw::Shell(ShellValue::Value(value)) => describe_value(value),
            Raw::Wire(value) | Raw::Dictionary(value) => describe_value(value),
        }
    }
}

pub(crate) fn describe_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {b}"),
        Value::Number(n) => format!("number {n}"),
        Value::String(s) => format!("string {s:?}"),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

/// A source of named property values.
pub trait Content {
    fn kind(&self) -> ContentKind;

    /// Looks up the value for a declared field. `None` when the key is absent.
    fn property(&self, field: &Field) -> Option<Raw<'_>>;

    /// Every key present in the input, declared or not.
    fn keys(&self) -> Vec<&str>;
}

impl<C: Content + ?Sized> Content for &C {
    fn kind(&self) -> ContentKind {
        (**self).kind()
    }

    fn property(&self, field: &Field) -> Option<Raw<'_>> {
        (**self).property(field)
    }

    fn keys(&self) -> Vec<&str> {
        (**self).keys()
    }
}

impl<'c> dyn Content + 'c {
    /// Reads a field and converts it. Absent and `null` values both yield `Ok(None)`.
    ///
    /// Conversion failures are wrapped with the field's property name.
    pub fn value_for<T>(
        &self,
        field: &Field,
        convert: impl FnOnce(Raw<'_>) -> Result<T, ConversionError>,
    ) -> Result<Option<T>, ConversionError> {
        match self.property(field) {
            Some(raw) if !raw.is_null() => convert(raw)
                .map(Some)
                .map_err(|e| e.in_property(field.name)),
            _ => Ok(None),
        }
    }

    /// Reads a field into `slot`, leaving the current value untouched when the key is absent.
    pub fn assign<T>(
        &self,
        field: &Field,
        slot: &mut Option<T>,
        convert: impl FnOnce(Raw<'_>) -> Result<T, ConversionError>,
    ) -> Result<(), ConversionError> {
        if let Some(value) = self.value_for(field, convert)? {
            *slot = Some(value);
        }
        Ok(())
    }
}

fn lookup_by_property<'m>(map: &'m Map<String, Value>, field: &Field) -> Option<&'m Value> {
    map.iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(field.name))
        .map(|(_, value)| value)
        .or_else(|| map.get(field.serialized_name))
}

/// Hashtable-like input keyed by property names.
#[derive(Debug, Clone, Copy)]
pub struct Dictionary<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Dictionary<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }
}

impl Content for Dictionary<'_> {
    fn kind(&self) -> ContentKind {
        ContentKind::Dictionary
    }

    fn property(&self, field: &Field) -> Option<Raw<'_>> {
        lookup_by_property(self.map, field).map(Raw::Dictionary)
    }

    fn keys(&self) -> Vec<&str> {
        self.map.keys().map(String::as_str).collect()
    }
}

/// A JSON object as received from the service, keyed by serialized names.
#[derive(Debug, Clone, Copy)]
pub struct WireObject<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> WireObject<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }
}

impl Content for WireObject<'_> {
    fn kind(&self) -> ContentKind {
        ContentKind::Wire
    }

    fn property(&self, field: &Field) -> Option<Raw<'_>> {
        self.map.get(field.serialized_name).map(Raw::Wire)
    }

    fn keys(&self) -> Vec<&str> {
        self.map.keys().map(String::as_str).collect()
    }
}

/// A value held by a [`ShellObject`] property.
///
/// Pipeline objects mix plain values, lists, and further property bags; hashtables show up as
/// JSON objects inside [`ShellValue::Value`] and are read with dictionary rules.
///
/// # Loading from JSON
///
/// Variants are not tagged. A JSON object loads as [`ShellValue::Object`] only when its keys
/// are exactly `properties` (a list of `{"name", "value"}` pairs) and optionally
/// `type_names`. Every other object is a hashtable. A hashtable of that exact shape
/// therefore reloads as a shell object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShellValue {
    Object(ShellObject),
    List(Vec<ShellValue>),
    Value(Value),
}

impl ShellValue {
    /// Flattens the value to plain JSON. Shell objects become maps of their properties.
    pub fn to_json(&self) -> Value {
        match self {
            ShellValue::Object(object) => object.to_json(),
            ShellValue::List(items) => Value::Array(items.iter().map(ShellValue::to_json).collect()),
            ShellValue::Value(value) => value.clone(),
        }
    }
}

impl From<Value> for ShellValue {
    fn from(value: Value) -> Self {
        ShellValue::Value(value)
    }
}

impl From<ShellObject> for ShellValue {
    fn from(object: ShellObject) -> Self {
        ShellValue::Object(object)
    }
}

impl From<Vec<ShellValue>> for ShellValue {
    fn from(items: Vec<ShellValue>) -> Self {
        ShellValue::List(items)
    }
}

impl From<&str> for ShellValue {
    fn from(s: &str) -> Self {
        ShellValue::Value(Value::from(s))
    }
}

impl From<String> for ShellValue {
    fn from(s: String) -> Self {
        ShellValue::Value(Value::from(s))
    }
}

impl From<i64> for ShellValue {
    fn from(n: i64) -> Self {
        ShellValue::Value(Value::from(n))
    }
}

impl From<i32> for ShellValue {
    fn from(n: i32) -> Self {
        ShellValue::Value(Value::from(n))
    }
}

impl From<bool> for ShellValue {
    fn from(b: bool) -> Self {
        ShellValue::Value(Value::from(b))
    }
}

/// One named property of a [`ShellObject`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellProperty {
    pub name: String,
    pub value: ShellValue,
}

/// A tagged property bag, the shape a command shell hands to the next command in a pipeline.
///
/// ```rust
/// use dataprotection_runtime::ShellObject;
///
/// let object = ShellObject::new()
///     .with_type_name("Deserialized.Error")
///     .with_property("Code", "NotFound")
///     .with_property("Message", "Resource missing");
/// assert_eq!(object.properties.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShellObject {
    #[serde(default)]
    pub type_names: Vec<String>,
    pub properties: Vec<ShellProperty>,
}

impl ShellObject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_names.push(type_name.into());
        self
    }

    /// Appends a property. Names are kept as given; lookups ignore ASCII case.
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<ShellValue>) -> Self {
        self.properties.push(ShellProperty {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    pub fn to_json(&self) -> Value {
        Value::Object(
            self.properties
                .iter()
                .map(|p| (p.name.clone(), p.value.to_json()))
                .collect(),
        )
    }

    fn find(&self, field: &Field) -> Option<&ShellProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(field.name))
            .or_else(|| self.properties.iter().find(|p| p.name == field.serialized_name))
    }
}

impl Content for ShellObject {
    fn kind(&self) -> ContentKind {
        ContentKind::ShellObject
    }

    fn property(&self, field: &Field) -> Option<Raw<'_>> {
        self.find(field).map(|p| Raw::Shell(&p.value))
    }

    fn keys(&self) -> Vec<&str> {
        self.properties.iter().map(|p| p.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RETRY_AFTER: Field = Field::new("RetryAfter", "retryAfter");
    const DETAIL: Field = Field::new("Detail", "details");

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test input must be an object"),
        }
    }

    #[test]
    fn dictionary_lookup_ignores_case_and_falls_back_to_serialized_name() {
        let map = object(json!({"retryafter": 5, "details": []}));
        let dictionary = Dictionary::new(&map);

        let raw = dictionary.property(&RETRY_AFTER).unwrap();
        assert_eq!(raw.as_value(), Some(&json!(5)));
        assert!(dictionary.property(&DETAIL).is_some());
    }

    #[test]
    fn wire_lookup_is_exact() {
        let map = object(json!({"RetryAfter": 5, "details": []}));
        let wire = WireObject::new(&map);

        assert!(wire.property(&RETRY_AFTER).is_none());
        assert!(wire.property(&DETAIL).is_some());
    }

    #[test]
    fn shell_lookup_matches_property_name() {
        let shell = ShellObject::new().with_property("RETRYAFTER", 30);
        let raw = shell.property(&RETRY_AFTER).unwrap();
        assert_eq!(raw.as_value(), Some(&json!(30)));
        assert_eq!(shell.keys(), vec!["RETRYAFTER"]);
    }

    #[test]
    fn nested_objects_keep_their_source_rules() {
        let value = json!({"inner": {"a": 1}});
        let inner = &value["inner"];

        assert_eq!(Raw::Wire(inner).as_content().unwrap().kind(), ContentKind::Wire);
        assert_eq!(
            Raw::Dictionary(inner).as_content().unwrap().kind(),
            ContentKind::Dictionary
        );
        assert!(Raw::Wire(&value["missing"]).as_content().is_none());
    }

    #[test]
    fn single_value_is_its_own_element() {
        let value = json!("only");
        assert_eq!(Raw::Wire(&value).elements().len(), 1);

        let list = ShellValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(Raw::Shell(&list).elements().len(), 2);
    }

    #[test]
    fn value_for_treats_null_as_absent() {
        let map = object(json!({"retryAfter": null}));
        let dictionary = Dictionary::new(&map);
        let content: &dyn Content = &dictionary;

        let value = content
            .value_for(&RETRY_AFTER, |_| -> Result<i32, ConversionError> {
                unreachable!("null values are never converted")
            })
            .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn shell_object_flattens_to_json() {
        let shell = ShellObject::new()
            .with_property("Code", "X")
            .with_property("Items", ShellValue::List(vec![1.into(), 2.into()]));
        assert_eq!(shell.to_json(), json!({"Code": "X", "Items": [1, 2]}));
    }

    #[test]
    fn shell_object_loads_and_dumps_as_json() {
        let text = r#"{
            "type_names": ["Deserialized.Error"],
            "properties": [
                {"name": "Code", "value": "NotFound"},
                {"name": "Detail", "value": [{"properties": [{"name": "Code", "value": "Inner"}]}]},
                {"name": "Tag", "value": {"env": "prod"}}
            ]
        }"#;
        let object: ShellObject = serde_json::from_str(text).unwrap();

        let expected = ShellObject::new()
            .with_type_name("Deserialized.Error")
            .with_property("Code", "NotFound")
            .with_property(
                "Detail",
                ShellValue::List(vec![ShellObject::new().with_property("Code", "Inner").into()]),
            )
            .with_property("Tag", json!({"env": "prod"}));
        assert_eq!(object, expected);

        let dumped = serde_json::to_string(&object).unwrap();
        assert_eq!(serde_json::from_str::<ShellObject>(&dumped).unwrap(), object);
    }

    #[test]
    fn only_the_exact_shell_shape_loads_as_shell_object() {
        let shell: ShellValue =
            serde_json::from_value(json!({"properties": [{"name": "a", "value": 1}]})).unwrap();
        assert!(matches!(shell, ShellValue::Object(_)));

        let extra_key = json!({"properties": [], "count": 0});
        let hashtable: ShellValue = serde_json::from_value(extra_key.clone()).unwrap();
        assert_eq!(hashtable, ShellValue::Value(extra_key));

        let extra_pair_key = json!({"properties": [{"name": "a", "value": 1, "note": "x"}]});
        let hashtable: ShellValue = serde_json::from_value(extra_pair_key.clone()).unwrap();
        assert_eq!(hashtable, ShellValue::Value(extra_pair_key));
    }
}
