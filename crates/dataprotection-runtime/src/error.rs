//! # Conversion Errors
//!
//! Every fallible conversion in the runtime returns [`ConversionError`]. Errors raised deep
//! inside a nested model are wrapped on the way out with the property name and, for arrays,
//! the element index, so the caller sees the full path to the offending value:
//!
//! ```text
//! property `Detail`: element 1: property `RetryAfter`: cannot convert string "soon" to int32
//! ```

use crate::content::Raw;

/// Errors that abort the construction of a model.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// A raw value could not be coerced to the declared field type.
    #[error("cannot convert {found} to {expected}")]
    Coercion {
        expected: &'static str,
        found: String,
    },

    /// A failure inside a named property.
    #[error("property `{property}`: {source}")]
    Property {
        property: String,
        #[source]
        source: Box<ConversionError>,
    },

    /// A failure inside one element of an array-valued property.
    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },

    /// A model was requested from a value that has no named properties.
    #[error("{model} expects an object, found {found}")]
    NotAnObject { model: &'static str, found: String },

    /// Strict mode only: the input carried a key the model does not declare.
    #[error("unknown property `{property}` for {model}")]
    UnknownProperty {
        model: &'static str,
        property: String,
    },

    /// The input text was not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConversionError {
    pub(crate) fn coercion(expected: &'static str, raw: Raw<'_>) -> Self {
        ConversionError::Coercion {
            expected,
            found: raw.describe(),
        }
    }

    pub(crate) fn in_property(self, property: impl Into<String>) -> Self {
        ConversionError::Property {
            property: property.into(),
            source: Box::new(self),
        }
    }

    pub(crate) fn in_element(self, index: usize) -> Self {
        ConversionError::Element {
            index,
            source: Box::new(self),
        }
    }

    /// The innermost error, with all property and element wrappers removed.
    pub fn root_cause(&self) -> &ConversionError {
        match self {
            ConversionError::Property { source, .. } | ConversionError::Element { source, .. } => {
                source.root_cause()
            }
            other => other,
        }
    }

    /// Whether the innermost error is a type-coercion failure.
    pub fn is_coercion(&self) -> bool {
        matches!(self.root_cause(), ConversionError::Coercion { .. })
    }
}
