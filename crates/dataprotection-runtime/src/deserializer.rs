//! # Generic Deserializer
//!
//! [`Deserializer`] runs the single population pass shared by every model:
//!
//! 1. **Before hook**: may short-circuit with [`HookFlow::ReturnNow`].
//! 2. **Key check**: unknown keys are logged at `trace` (permissive) or rejected (strict).
//! 3. **Populate**: [`Model::populate`] reads each declared field.
//! 4. **After hook**: post-processes the instance.
//!
//! The pass is all-or-nothing. The instance under construction is private to the pass and is
//! only handed back once every field converted, so a caller never observes a partially
//! populated model.

use crate::content::{describe_value, Content, Dictionary, ShellObject, WireObject};
use crate::error::ConversionError;
use crate::hooks::{DeserializeHooks, HookFlow, NoHooks};
use crate::model::Model;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

/// Builds models of type `M` from content, with optional hooks and strictness.
///
/// ```rust
/// use dataprotection_runtime::{Deserializer, ConversionError};
/// # use dataprotection_runtime::{Content, Field, Model, SerializationMode};
/// # use serde_json::{Map, Value};
/// # #[derive(Debug, Default)]
/// # struct Headers { location: Option<String> }
/// # const LOCATION: Field = Field::new("Location", "location");
/// # impl Model for Headers {
/// #     const NAME: &'static str = "Headers";
/// #     const FIELDS: &'static [Field] = &[LOCATION];
/// #     fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
/// #         content.assign(&LOCATION, &mut self.location, dataprotection_runtime::convert::to_string)
/// #     }
/// #     fn write_json(&self, _: &mut Map<String, Value>, _: SerializationMode) {}
/// # }
///
/// // Permissive (default): unknown keys are ignored.
/// let headers = Deserializer::<Headers>::new()
///     .from_json_str(r#"{"location": "https://example", "extra": 1}"#)
///     .unwrap();
/// assert_eq!(headers.location.as_deref(), Some("https://example"));
///
/// // Strict: unknown keys are an error.
/// let err = Deserializer::<Headers>::new()
///     .strict(true)
///     .from_json_str(r#"{"location": "https://example", "extra": 1}"#)
///     .unwrap_err();
/// assert!(matches!(err, ConversionError::UnknownProperty { .. }));
/// ```
pub struct Deserializer<'h, M: Model> {
    hooks: &'h dyn DeserializeHooks<M>,
    strict: bool,
}

impl<M: Model> Deserializer<'static, M> {
    /// A permissive deserializer with no-op hooks.
    pub fn new() -> Self {
        Self {
            hooks: &NoHooks,
            strict: false,
        }
    }
}

impl<M: Model> Default for Deserializer<'static, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'h, M: Model> Deserializer<'h, M> {
    /// A permissive deserializer using `hooks` around the population pass.
    pub fn with_hooks(hooks: &'h dyn DeserializeHooks<M>) -> Self {
        Self {
            hooks,
            strict: false,
        }
    }

    /// Rejects top-level keys the model does not declare.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn from_dictionary(&self, map: &Map<String, Value>) -> Result<M, ConversionError> {
        self.deserialize(&Dictionary::new(map))
    }

    pub fn from_shell_object(&self, object: &ShellObject) -> Result<M, ConversionError> {
        self.deserialize(object)
    }

    /// Parses wire JSON text, then populates from the resulting object.
    ///
    /// Nesting depth is not capped, so any text produced by [`Model::to_json_string`] reads
    /// back.
    pub fn from_json_str(&self, text: &str) -> Result<M, ConversionError> {
        let value = parse_unbounded(text).map_err(|e| {
            warn!(model = M::NAME, error = %e, "Invalid JSON");
            ConversionError::from(e)
        })?;
        match &value {
            Value::Object(map) => self.deserialize(&WireObject::new(map)),
            other => Err(ConversionError::NotAnObject {
                model: M::NAME,
                found: describe_value(other),
            }),
        }
    }

    /// Runs the population pass over any content source.
    pub fn deserialize(&self, content: &dyn Content) -> Result<M, ConversionError> {
        let model = M::NAME;
        let source = content.kind();
        debug!(model, ?source, "Deserializing");

        let mut instance = M::default();
        if self.hooks.before(content) == HookFlow::ReturnNow {
            debug!(model, ?source, "Before hook returned early");
            return Ok(instance);
        }

        self.check_keys(content)?;

        if let Err(e) = instance.populate(content) {
            warn!(model, ?source, error = %e, "Deserialization failed");
            return Err(e);
        }

        self.hooks.after(&mut instance, content);
        Ok(instance)
    }

    fn check_keys(&self, content: &dyn Content) -> Result<(), ConversionError> {
        let source = content.kind();
        for key in content.keys() {
            if M::FIELDS.iter().any(|f| f.matches(key, source)) {
                continue;
            }
            if self.strict {
                warn!(model = M::NAME, key, "Unknown property rejected");
                return Err(ConversionError::UnknownProperty {
                    model: M::NAME,
                    property: key.to_string(),
                });
            }
            trace!(model = M::NAME, key, "Ignoring unknown property");
        }
        Ok(())
    }
}

fn parse_unbounded(text: &str) -> Result<Value, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(&mut de)?;
    de.end()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentKind;
    use crate::convert;
    use crate::model::{write_field, Field, SerializationMode};
    use serde_json::json;
    use std::cell::Cell;

    const NAME_FIELD: Field = Field::new("Name", "name");
    const COUNT: Field = Field::new("Count", "count");

    #[derive(Debug, Default, PartialEq)]
    struct Widget {
        name: Option<String>,
        count: Option<i32>,
    }

    impl Model for Widget {
        const NAME: &'static str = "Widget";
        const FIELDS: &'static [Field] = &[NAME_FIELD, COUNT];

        fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
            content.assign(&NAME_FIELD, &mut self.name, convert::to_string)?;
            content.assign(&COUNT, &mut self.count, convert::to_i32)?;
            Ok(())
        }

        fn write_json(&self, out: &mut Map<String, Value>, mode: SerializationMode) {
            write_field(out, &NAME_FIELD, self.name.clone().map(Value::from), mode);
            write_field(out, &COUNT, self.count.map(Value::from), mode);
        }
    }

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    struct Skip;

    impl DeserializeHooks<Widget> for Skip {
        fn before(&self, _content: &dyn Content) -> HookFlow {
            HookFlow::ReturnNow
        }

        fn after(&self, _model: &mut Widget, _content: &dyn Content) {
            unreachable!("after hook must not run when before returned early");
        }
    }

    #[derive(Default)]
    struct Recorder {
        saw: Cell<Option<ContentKind>>,
    }

    impl DeserializeHooks<Widget> for Recorder {
        fn before(&self, content: &dyn Content) -> HookFlow {
            self.saw.set(Some(content.kind()));
            HookFlow::Continue
        }

        fn after(&self, widget: &mut Widget, _content: &dyn Content) {
            widget.count = widget.count.map(|c| c * 10);
        }
    }

    #[test]
    fn before_hook_can_skip_population() {
        let widget = Deserializer::<Widget>::with_hooks(&Skip)
            .from_dictionary(&map(json!({"name": "gear", "count": 3})))
            .unwrap();
        assert_eq!(widget, Widget::default());
    }

    #[test]
    fn after_hook_sees_populated_instance() {
        let recorder = Recorder::default();
        let widget = Deserializer::<Widget>::with_hooks(&recorder)
            .from_json_str(r#"{"name": "gear", "count": 3}"#)
            .unwrap();
        assert_eq!(widget.count, Some(30));
        assert_eq!(recorder.saw.get(), Some(ContentKind::Wire));
    }

    #[test]
    fn missing_fields_stay_default() {
        let widget = Widget::from_dictionary(&map(json!({"NAME": "gear"}))).unwrap();
        assert_eq!(widget.name.as_deref(), Some("gear"));
        assert_eq!(widget.count, None);
    }

    #[test]
    fn coercion_failure_returns_no_instance() {
        let err = Widget::from_dictionary(&map(json!({"name": "gear", "count": "many"})))
            .unwrap_err();
        assert!(err.is_coercion());
        assert!(matches!(err, ConversionError::Property { ref property, .. } if property == "Count"));
    }

    #[test]
    fn strict_mode_rejects_unknown_keys() {
        let input = map(json!({"name": "gear", "colour": "red"}));
        assert!(Widget::from_dictionary(&input).is_ok());

        let err = Deserializer::<Widget>::new()
            .strict(true)
            .from_dictionary(&input)
            .unwrap_err();
        assert!(
            matches!(err, ConversionError::UnknownProperty { ref property, .. } if property == "colour")
        );
    }

    #[test]
    fn json_root_must_be_an_object() {
        let err = Widget::from_json_string("[1, 2]").unwrap_err();
        assert!(matches!(err, ConversionError::NotAnObject { model: "Widget", .. }));

        let err = Widget::from_json_string("{not json").unwrap_err();
        assert!(matches!(err, ConversionError::Json(_)));
    }

    #[test]
    fn json_text_round_trips() {
        let widget = Widget {
            name: Some("gear".into()),
            count: Some(4),
        };
        let text = widget.to_json_string();
        assert_eq!(Widget::from_json_string(&text).unwrap(), widget);

        let sparse = Widget::default().to_json_string_with(SerializationMode::SetOnly);
        assert_eq!(sparse, "{}");
    }
}
