//! The resource management error response.
//!
//! `Error` is recursive: [`Error::details`] holds further `Error` values, converted with the
//! same field rules as the top level, to any depth.

use super::ErrorAdditionalInfo;
use dataprotection_runtime::convert::{array_of, to_string};
use dataprotection_runtime::{
    models_json, write_field, Content, ConversionError, Field, Model, SerializationMode,
};
use serde_json::{Map, Value};
use std::fmt;

const ADDITIONAL_INFO: Field = Field::new("AdditionalInfo", "additionalInfo")
    .read_only()
    .describe("The error additional info.");
const CODE: Field = Field::new("Code", "code")
    .read_only()
    .describe("The error code.");
const MESSAGE: Field = Field::new("Message", "message")
    .read_only()
    .describe("The error message.");
const TARGET: Field = Field::new("Target", "target")
    .read_only()
    .describe("The error target.");
const DETAIL: Field = Field::new("Detail", "details")
    .read_only()
    .describe("The error details.");

/// The resource management error response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Error {
    additional_info: Option<Vec<ErrorAdditionalInfo>>,
    code: Option<String>,
    message: Option<String>,
    target: Option<String>,
    details: Option<Vec<Error>>,
}

impl Error {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Empty when the service sent none.
    pub fn additional_info(&self) -> &[ErrorAdditionalInfo] {
        self.additional_info.as_deref().unwrap_or_default()
    }

    /// Nested errors. Empty when the service sent none.
    pub fn details(&self) -> &[Error] {
        self.details.as_deref().unwrap_or_default()
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn with_additional_info(mut self, additional_info: Vec<ErrorAdditionalInfo>) -> Self {
        self.additional_info = Some(additional_info);
        self
    }

    pub fn with_details(mut self, details: Vec<Error>) -> Self {
        self.details = Some(details);
        self
    }

    /// Depth-first walk over this error and every nested detail.
    pub fn iter(&self) -> impl Iterator<Item = &Error> + '_ {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.details().iter().rev());
            Some(next)
        })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code(), self.message()) {
            (Some(code), Some(message)) => write!(f, "{code}: {message}"),
            (Some(code), None) => write!(f, "{code}"),
            (None, Some(message)) => write!(f, "{message}"),
            (None, None) => write!(f, "unknown error"),
        }?;
        if let Some(target) = self.target() {
            write!(f, " (target: {target})")?;
        }
        Ok(())
    }
}

impl Model for Error {
    const NAME: &'static str = "Error";
    const FIELDS: &'static [Field] = &[ADDITIONAL_INFO, CODE, MESSAGE, TARGET, DETAIL];

    fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
        content.assign(
            &ADDITIONAL_INFO,
            &mut self.additional_info,
            array_of(ErrorAdditionalInfo::convert_from),
        )?;
        content.assign(&CODE, &mut self.code, to_string)?;
        content.assign(&MESSAGE, &mut self.message, to_string)?;
        content.assign(&TARGET, &mut self.target, to_string)?;
        content.assign(&DETAIL, &mut self.details, array_of(Error::convert_from))?;
        Ok(())
    }

    fn write_json(&self, out: &mut Map<String, Value>, mode: SerializationMode) {
        write_field(
            out,
            &ADDITIONAL_INFO,
            models_json(self.additional_info.as_deref(), mode),
            mode,
        );
        write_field(out, &CODE, self.code.clone().map(Value::from), mode);
        write_field(out, &MESSAGE, self.message.clone().map(Value::from), mode);
        write_field(out, &TARGET, self.target.clone().map(Value::from), mode);
        write_field(out, &DETAIL, models_json(self.details.as_deref(), mode), mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefers_code_and_message() {
        let error = Error::new()
            .with_code("NotFound")
            .with_message("Resource missing")
            .with_target("vault");
        assert_eq!(error.to_string(), "NotFound: Resource missing (target: vault)");
        assert_eq!(Error::new().to_string(), "unknown error");
    }

    #[test]
    fn iter_walks_details_depth_first() {
        let error = Error::new().with_code("root").with_details(vec![
            Error::new()
                .with_code("a")
                .with_details(vec![Error::new().with_code("a1")]),
            Error::new().with_code("b"),
        ]);
        let codes: Vec<_> = error.iter().filter_map(Error::code).collect();
        assert_eq!(codes, vec!["root", "a", "a1", "b"]);
    }
}
