//! # Customization Hooks
//!
//! Consumers customize model construction without touching the model code by injecting a
//! [`DeserializeHooks`] strategy into a [`Deserializer`](crate::Deserializer).
//!
//! Both hooks are **Provided Methods** that do nothing by default, so an implementation only
//! overrides the one it needs:
//!
//! - [`DeserializeHooks::before`] sees the raw content first and may return
//!   [`HookFlow::ReturnNow`], in which case default population is skipped entirely and the
//!   caller receives `M::default()` (the after hook is not called either).
//! - [`DeserializeHooks::after`] runs once default population has succeeded and may
//!   post-process the freshly built instance.
//!
//! ```rust
//! use dataprotection_runtime::{Content, DeserializeHooks, Deserializer};
//! # use dataprotection_runtime::{ConversionError, Field, Model, SerializationMode};
//! # use serde_json::{json, Map, Value};
//! # #[derive(Debug, Default, PartialEq)]
//! # struct Note { text: Option<String> }
//! # const TEXT: Field = Field::new("Text", "text");
//! # impl Model for Note {
//! #     const NAME: &'static str = "Note";
//! #     const FIELDS: &'static [Field] = &[TEXT];
//! #     fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
//! #         content.assign(&TEXT, &mut self.text, dataprotection_runtime::convert::to_string)
//! #     }
//! #     fn write_json(&self, _: &mut Map<String, Value>, _: SerializationMode) {}
//! # }
//!
//! struct Uppercase;
//!
//! impl DeserializeHooks<Note> for Uppercase {
//!     fn after(&self, note: &mut Note, _content: &dyn Content) {
//!         note.text = note.text.take().map(|t| t.to_uppercase());
//!     }
//! }
//!
//! let map = json!({"text": "hello"}).as_object().cloned().unwrap();
//! let note = Deserializer::<Note>::with_hooks(&Uppercase).from_dictionary(&map).unwrap();
//! assert_eq!(note.text.as_deref(), Some("HELLO"));
//! ```

use crate::content::Content;

/// Whether default population should run after the before hook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HookFlow {
    #[default]
    Continue,
    ReturnNow,
}

/// Strategy bracketing the default population pass of model `M`.
pub trait DeserializeHooks<M> {
    /// Called before any field is read. Return [`HookFlow::ReturnNow`] to skip population.
    fn before(&self, _content: &dyn Content) -> HookFlow {
        HookFlow::Continue
    }

    /// Called after every field has been read successfully.
    fn after(&self, _model: &mut M, _content: &dyn Content) {}
}

/// The default strategy: both hooks are no-ops.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl<M> DeserializeHooks<M> for NoHooks {}
