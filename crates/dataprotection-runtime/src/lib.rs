//! # Data Protection Model Runtime
//!
//! This crate provides the building blocks the Data Protection client models are made of:
//! a single, generic **deserialization adapter** that turns loosely-typed input into
//! strongly-typed records, and writes those records back out as JSON.
//!
//! ## Architecture Overview
//!
//! The runtime separates concerns into three layers:
//!
//! 1. **Content Layer** ([`Content`]) - where values come from: a dictionary, a shell pipeline
//!    object, or a JSON payload from the wire
//! 2. **Conversion Layer** ([`convert`]) - per-field type coercion and array mapping
//! 3. **Model Layer** ([`Model`], [`Deserializer`]) - the field table of each record and the one
//!    population pass shared by all of them
//!
//! A model describes its fields **once**; the runtime supplies every entry point:
//!
//! | Entry point | Input |
//! |-------------|-------|
//! | [`Model::from_dictionary`] | `serde_json::Map` keyed by property names |
//! | [`Model::from_shell_object`] | [`ShellObject`] property bag |
//! | [`Model::from_json_string`] | JSON text keyed by serialized names |
//! | [`Model::to_json_string`] | back to JSON text |
//!
//! ## Customization
//!
//! Pre- and post-processing is injected through [`DeserializeHooks`] rather than baked into
//! the models. See the [`hooks`] module.
//!
//! ## Failure Semantics
//!
//! - Coercion and parse failures abort construction with a [`ConversionError`] that names the
//!   property and element where the failure happened.
//! - Missing optional fields are not an error; they stay unset.
//! - Unknown keys are ignored unless the [`Deserializer`] is put in strict mode.
//! - Validation issues are *reported*, never raised. See [`validation`].
//!
//! ## Observability
//!
//! Every pass is traced with `tracing`. See the [`tracing`](crate::tracing) module.

pub mod content;
pub mod convert;
pub mod deserializer;
pub mod error;
pub mod hooks;
pub mod model;
pub mod tracing;
pub mod validation;

// Re-export core types for convenience
pub use content::{Content, ContentKind, Dictionary, Raw, ShellObject, ShellProperty, ShellValue, WireObject};
pub use deserializer::Deserializer;
pub use error::ConversionError;
pub use hooks::{DeserializeHooks, HookFlow, NoHooks};
pub use model::{models_json, write_field, Field, Model, SerializationMode};
pub use validation::{EventListener, ValidationEvent, ValidationReport, Validates};
