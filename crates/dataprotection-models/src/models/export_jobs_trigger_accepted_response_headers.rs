use dataprotection_runtime::convert::{to_i32, to_string};
use dataprotection_runtime::{write_field, Content, ConversionError, Field, Model, SerializationMode};
use serde_json::{Map, Value};
use tracing::debug;

const LOCATION: Field = Field::new("Location", "location");
const RETRY_AFTER: Field = Field::new("RetryAfter", "retryAfter");

/// Headers of the `202 Accepted` answer to an export-jobs trigger.
///
/// `location` is the operation status URI to poll and `retry_after` the number of seconds
/// to wait before polling it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportJobsTriggerAcceptedResponseHeaders {
    location: Option<String>,
    retry_after: Option<i32>,
}

impl ExportJobsTriggerAcceptedResponseHeaders {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn retry_after(&self) -> Option<i32> {
        self.retry_after
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_retry_after(mut self, seconds: i32) -> Self {
        self.retry_after = Some(seconds);
        self
    }

    /// Reads the headers from raw `(name, value)` pairs.
    ///
    /// Names match case-insensitively and the first occurrence wins. Unlike body
    /// conversion this never fails: a `Retry-After` that is not an integer is skipped.
    ///
    /// ```rust
    /// use dataprotection_models::ExportJobsTriggerAcceptedResponseHeaders;
    ///
    /// let headers = ExportJobsTriggerAcceptedResponseHeaders::from_headers([
    ///     ("location", "https://management.azure.com/operations/1"),
    ///     ("Retry-After", "30"),
    /// ]);
    /// assert_eq!(headers.retry_after(), Some(30));
    /// ```
    pub fn from_headers<'a, I>(headers: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut out = Self::default();
        for (name, value) in headers {
            if name.eq_ignore_ascii_case("Location") {
                if out.location.is_none() {
                    out.location = Some(value.to_string());
                }
            } else if name.eq_ignore_ascii_case("Retry-After") && out.retry_after.is_none() {
                match value.trim().parse::<i32>() {
                    Ok(seconds) => out.retry_after = Some(seconds),
                    Err(_) => debug!(value, "Ignoring non-integer Retry-After header"),
                }
            }
        }
        out
    }
}

impl Model for ExportJobsTriggerAcceptedResponseHeaders {
    const NAME: &'static str = "ExportJobsTriggerAcceptedResponseHeaders";
    const FIELDS: &'static [Field] = &[LOCATION, RETRY_AFTER];

    fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
        content.assign(&LOCATION, &mut self.location, to_string)?;
        content.assign(&RETRY_AFTER, &mut self.retry_after, to_i32)?;
        Ok(())
    }

    fn write_json(&self, out: &mut Map<String, Value>, mode: SerializationMode) {
        write_field(out, &LOCATION, self.location.clone().map(Value::from), mode);
        write_field(out, &RETRY_AFTER, self.retry_after.map(Value::from), mode);
    }
}
