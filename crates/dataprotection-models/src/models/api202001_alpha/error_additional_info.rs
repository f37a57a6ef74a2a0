use dataprotection_runtime::convert::{to_any, to_string};
use dataprotection_runtime::{write_field, Content, ConversionError, Field, Model, SerializationMode};
use serde_json::{Map, Value};

const TYPE: Field = Field::new("Type", "type")
    .read_only()
    .describe("The additional info type.");
const INFO: Field = Field::new("Info", "info")
    .read_only()
    .describe("The additional info.");

/// The resource management error additional info.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorAdditionalInfo {
    type_: Option<String>,
    info: Option<Value>,
}

impl ErrorAdditionalInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info_type(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    /// Free-form payload; its shape depends on [`ErrorAdditionalInfo::info_type`].
    pub fn info(&self) -> Option<&Value> {
        self.info.as_ref()
    }

    pub fn with_info_type(mut self, info_type: impl Into<String>) -> Self {
        self.type_ = Some(info_type.into());
        self
    }

    /// A JSON `null` payload leaves `info` unset, as it would be when read back.
    pub fn with_info(mut self, info: Value) -> Self {
        self.info = Some(info).filter(|info| !info.is_null());
        self
    }
}

impl Model for ErrorAdditionalInfo {
    const NAME: &'static str = "ErrorAdditionalInfo";
    const FIELDS: &'static [Field] = &[TYPE, INFO];

    fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
        content.assign(&TYPE, &mut self.type_, to_string)?;
        content.assign(&INFO, &mut self.info, to_any)?;
        Ok(())
    }

    fn write_json(&self, out: &mut Map<String, Value>, mode: SerializationMode) {
        write_field(out, &TYPE, self.type_.clone().map(Value::from), mode);
        write_field(out, &INFO, self.info.clone(), mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_info_is_unset() {
        let info = ErrorAdditionalInfo::new()
            .with_info_type("Hint")
            .with_info(Value::Null);
        assert_eq!(info.info(), None);

        let back = ErrorAdditionalInfo::from_json_string(&info.to_json_string()).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn nested_nulls_in_info_are_kept() {
        let info = ErrorAdditionalInfo::new().with_info(json!({"reason": null}));
        let back = ErrorAdditionalInfo::from_json_string(&info.to_json_string()).unwrap();
        assert_eq!(back.info(), Some(&json!({"reason": null})));
    }
}
