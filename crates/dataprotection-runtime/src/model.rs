//! # Model Trait
//!
//! The `Model` trait is the contract every typed record (Error, resource lists, response
//! headers, …) implements so the generic [`Deserializer`] can build it from any
//! [`Content`] source and write it back out as JSON.
//!
//! A model only has to describe its own fields:
//! - [`Model::FIELDS`]: the field table (property name, serialized name, flags).
//! - [`Model::populate`]: read each field from content, one converter per field.
//! - [`Model::write_json`]: write each field into a JSON object.
//!
//! # Provided Methods
//! Everything else is provided and should not be overridden:
//! - [`Model::from_dictionary`], [`Model::from_shell_object`], [`Model::from_json_string`]
//! - [`Model::to_json_string`], [`Model::to_json_value`]
//! - [`Model::convert_from`], [`Model::can_convert_from`]
//!
//! To customize construction, inject [`DeserializeHooks`](crate::DeserializeHooks) into a
//! [`Deserializer`] instead.

use crate::content::{Content, ContentKind, Raw, ShellObject};
use crate::deserializer::Deserializer;
use crate::error::ConversionError;
use serde_json::{Map, Value};
use std::fmt::Debug;

/// Metadata for one declared field of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// Name used by dictionaries and shell objects (e.g. `RetryAfter`).
    pub name: &'static str,
    /// Key used on the wire (e.g. `retryAfter`).
    pub serialized_name: &'static str,
    /// Checked by [`assert_required_fields`](crate::validation::assert_required_fields),
    /// never during deserialization.
    pub required: bool,
    /// Descriptive only: read-only fields are still populated and emitted.
    pub read_only: bool,
    /// Descriptive only.
    pub description: &'static str,
}

impl Field {
    pub const fn new(name: &'static str, serialized_name: &'static str) -> Self {
        Self {
            name,
            serialized_name,
            required: false,
            read_only: false,
            description: "",
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn read_only(self) -> Self {
        Self {
            read_only: true,
            ..self
        }
    }

    pub const fn describe(self, description: &'static str) -> Self {
        Self {
            description,
            ..self
        }
    }

    /// Whether an input key names this field under the lookup rules of `source`.
    pub fn matches(&self, key: &str, source: ContentKind) -> bool {
        match source {
            ContentKind::Wire => key == self.serialized_name,
            ContentKind::Dictionary | ContentKind::ShellObject => {
                key.eq_ignore_ascii_case(self.name) || key == self.serialized_name
            }
        }
    }
}

/// Controls which fields [`Model::write_json`] emits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SerializationMode {
    /// Every declared field; unset fields are written as `null`.
    #[default]
    IncludeAll,
    /// Only fields that hold a value.
    SetOnly,
}

/// Writes one field into `out` according to `mode`.
pub fn write_field(
    out: &mut Map<String, Value>,
    field: &Field,
    value: Option<Value>,
    mode: SerializationMode,
) {
    match (value, mode) {
        (Some(value), _) => {
            out.insert(field.serialized_name.to_string(), value);
        }
        (None, SerializationMode::IncludeAll) => {
            out.insert(field.serialized_name.to_string(), Value::Null);
        }
        (None, SerializationMode::SetOnly) => {}
    }
}

/// JSON for an optional array of models.
pub fn models_json<M: Model>(items: Option<&[M]>, mode: SerializationMode) -> Option<Value> {
    items.map(|items| Value::Array(items.iter().map(|m| m.to_json_value(mode)).collect()))
}

/// Trait that every typed record implements to be built by the [`Deserializer`].
///
/// # Architecture Note
/// The population pass is written *once*, in [`Deserializer::deserialize`]: before-hook,
/// field-by-field population, after-hook. A model only supplies the per-field part, so adding
/// a model never means touching the pass itself.
///
/// `Default` is the "all fields unset" state; a model built from empty content equals
/// `M::default()`. Models own all their data, hence `'static`.
pub trait Model: Default + Debug + Sized + 'static {
    /// Schema name, used in logs and errors.
    const NAME: &'static str;

    /// Declared fields, including those owned by composed base records.
    const FIELDS: &'static [Field];

    /// Reads every declared field from `content`. Absent fields keep their current value.
    fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError>;

    /// Writes every declared field into `out`, keyed by serialized name.
    fn write_json(&self, out: &mut Map<String, Value>, mode: SerializationMode);

    // --- Provided entry points ---

    /// Builds the model from a hashtable-like map keyed by property names.
    fn from_dictionary(map: &Map<String, Value>) -> Result<Self, ConversionError> {
        Deserializer::<Self>::new().from_dictionary(map)
    }

    /// Builds the model from a shell pipeline object.
    fn from_shell_object(object: &ShellObject) -> Result<Self, ConversionError> {
        Deserializer::<Self>::new().from_shell_object(object)
    }

    /// Parses wire JSON text and builds the model from it.
    fn from_json_string(text: &str) -> Result<Self, ConversionError> {
        Deserializer::<Self>::new().from_json_str(text)
    }

    fn to_json_value(&self, mode: SerializationMode) -> Value {
        let mut out = Map::new();
        self.write_json(&mut out, mode);
        Value::Object(out)
    }

    /// Serializes every declared field to JSON text.
    fn to_json_string(&self) -> String {
        self.to_json_string_with(SerializationMode::IncludeAll)
    }

    fn to_json_string_with(&self, mode: SerializationMode) -> String {
        self.to_json_value(mode).to_string()
    }

    /// Converts an untyped value into this model.
    ///
    /// Accepts an object (read with the rules of the source it came from), a shell object, or
    /// a string holding wire JSON object text. This is the entry point array and nested fields
    /// use for their elements.
    fn convert_from(raw: Raw<'_>) -> Result<Self, ConversionError> {
        if let Some(content) = raw.as_content() {
            return Deserializer::<Self>::new().deserialize(&*content);
        }
        match raw.as_value() {
            Some(Value::String(text)) if text.trim_start().starts_with('{') => {
                Self::from_json_string(text)
            }
            _ => Err(ConversionError::NotAnObject {
                model: Self::NAME,
                found: raw.describe(),
            }),
        }
    }

    /// Whether [`Model::convert_from`] would accept the shape of `raw`.
    fn can_convert_from(raw: Raw<'_>) -> bool {
        raw.as_content().is_some()
            || matches!(raw.as_value(), Some(Value::String(text)) if text.trim_start().starts_with('{'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const NEXT: Field = Field::new("NextLink", "nextLink").describe("paging cursor");

    #[test]
    fn field_builders_are_const() {
        const STATE: Field = Field::new("ProvisioningState", "provisioningState").read_only();
        assert!(STATE.read_only);
        assert!(!STATE.required);
        assert_eq!(NEXT.description, "paging cursor");
    }

    #[test]
    fn field_matching_depends_on_source() {
        assert!(NEXT.matches("nextLink", ContentKind::Wire));
        assert!(!NEXT.matches("NextLink", ContentKind::Wire));
        assert!(NEXT.matches("NEXTLINK", ContentKind::Dictionary));
    }

    #[test]
    fn write_field_honours_mode() {
        let mut all = Map::new();
        write_field(&mut all, &NEXT, None, SerializationMode::IncludeAll);
        assert_eq!(Value::Object(all), json!({"nextLink": null}));

        let mut set_only = Map::new();
        write_field(&mut set_only, &NEXT, None, SerializationMode::SetOnly);
        assert!(set_only.is_empty());
    }
}
