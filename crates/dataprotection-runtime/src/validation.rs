//! # Validation
//!
//! Validation is separate from construction: a model that deserialized fine may still be
//! checked against its schema constraints by calling [`Validates::validate`]. Issues never
//! abort anything. They are reported as [`ValidationEvent`]s to an [`EventListener`] and the
//! caller decides what to do with them.
//!
//! The interface is async so listeners can forward events into an async pipeline, but the
//! checks themselves are in-memory and never wait on I/O.
//!
//! ## Listeners
//!
//! | Listener | Use |
//! |----------|-----|
//! | [`ValidationReport`] | Collect every event, inspect afterwards |
//! | [`ChannelListener`] | Stream events over a Tokio channel to another task |
//!
//! ```rust
//! use dataprotection_runtime::validation::{assert_not_null, EventListener, ValidationReport, Validates};
//! use async_trait::async_trait;
//!
//! struct Vault { name: Option<String> }
//!
//! #[async_trait]
//! impl Validates for Vault {
//!     async fn validate(&self, listener: &dyn EventListener) {
//!         assert_not_null(listener, "name", self.name.as_ref()).await;
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let report = ValidationReport::new();
//!     Vault { name: None }.validate(&report).await;
//!     assert!(report.has_errors());
//! }
//! ```

use crate::model::{Model, SerializationMode};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
    Information,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationEvent {
    pub severity: Severity,
    /// Dotted path to the offending property, e.g. `value[1].properties`.
    pub property: String,
    pub message: String,
}

impl ValidationEvent {
    pub fn error(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            property: property.into(),
            message: message.into(),
        }
    }

    pub fn warning(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            property: property.into(),
            message: message.into(),
        }
    }
}

/// Receives validation events.
#[async_trait]
pub trait EventListener: Send + Sync {
    async fn signal(&self, event: ValidationEvent);
}

/// Implemented by models that carry schema constraints.
#[async_trait]
pub trait Validates: Send + Sync {
    async fn validate(&self, listener: &dyn EventListener);
}

/// Reports an error event when a required value is missing.
pub async fn assert_not_null<T: ?Sized + Sync>(
    listener: &dyn EventListener,
    property: &str,
    value: Option<&T>,
) {
    if value.is_none() {
        listener
            .signal(ValidationEvent::error(
                property,
                format!("'{property}' should not be null"),
            ))
            .await;
    }
}

/// Reports an error event for every unset field of `model` whose [`Field`](crate::Field) is
/// marked required.
///
/// Events are keyed by serialized name, like the rest of the property paths.
pub async fn assert_required_fields<M: Model + Sync>(listener: &dyn EventListener, model: &M) {
    let set = model.to_json_value(SerializationMode::SetOnly);
    for field in M::FIELDS.iter().filter(|f| f.required) {
        let value = set.get(field.serialized_name);
        assert_not_null(listener, field.serialized_name, value).await;
    }
}

/// Validates a nested value, if present, reporting its events under `property`.
pub async fn assert_object_is_valid<V: Validates + ?Sized>(
    listener: &dyn EventListener,
    property: &str,
    value: Option<&V>,
) {
    if let Some(value) = value {
        let scoped = Scoped {
            parent: listener,
            prefix: property,
        };
        value.validate(&scoped).await;
    }
}

/// Prefixes every event's property path before forwarding it.
struct Scoped<'a> {
    parent: &'a dyn EventListener,
    prefix: &'a str,
}

#[async_trait]
impl EventListener for Scoped<'_> {
    async fn signal(&self, mut event: ValidationEvent) {
        event.property = if event.property.is_empty() {
            self.prefix.to_string()
        } else if event.property.starts_with('[') {
            format!("{}{}", self.prefix, event.property)
        } else {
            format!("{}.{}", self.prefix, event.property)
        };
        self.parent.signal(event).await;
    }
}

/// Collects events in memory.
///
/// Cheap to clone; clones share the same event list.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    events: Arc<Mutex<Vec<ValidationEvent>>>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events collected so far, in arrival order.
    pub fn events(&self) -> Vec<ValidationEvent> {
        self.lock().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.events().is_empty()
    }

    pub fn has_errors(&self) -> bool {
        self.events().iter().any(|e| e.severity == Severity::Error)
    }

    /// Recovers a poisoned lock. Pushes and clones never leave the list half-written.
    fn lock(&self) -> MutexGuard<'_, Vec<ValidationEvent>> {
        self.events.lock().unwrap_or_else(|poisoned| {
            warn!("Validation report lock poisoned, recovering collected events");
            poisoned.into_inner()
        })
    }
}

#[async_trait]
impl EventListener for ValidationReport {
    async fn signal(&self, event: ValidationEvent) {
        debug!(property = %event.property, severity = ?event.severity, "Validation event");
        self.lock().push(event);
    }
}

/// Forwards events over an unbounded Tokio channel.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: mpsc::UnboundedSender<ValidationEvent>,
}

impl ChannelListener {
    /// Creates the listener and the receiving end of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ValidationEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl EventListener for ChannelListener {
    async fn signal(&self, event: ValidationEvent) {
        if self.sender.send(event).is_err() {
            warn!("Validation event dropped, receiver closed");
        }
    }
}
