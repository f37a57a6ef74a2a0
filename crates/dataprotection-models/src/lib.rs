//! # Data Protection Models
//!
//! Client models of the Azure Data Protection resource-management API, built on
//! [`dataprotection_runtime`].
//!
//! ## Core Components
//!
//! - **[models::api202001_alpha]**: the versioned body models ([`Error`], [`ErrorAdditionalInfo`],
//!   [`ResourceOperationGateKeeperResourceList`] and the resources it pages over).
//! - **[`ExportJobsTriggerAcceptedResponseHeaders`]**: typed view of the `202 Accepted` headers.
//!
//! Every model implements [`Model`](dataprotection_runtime::Model), so the same four entry
//! points work everywhere:
//!
//! ```rust
//! use dataprotection_models::Error;
//! use dataprotection_runtime::Model;
//!
//! let error = Error::from_json_string(r#"{"code":"NotFound","message":"Resource missing"}"#)?;
//! assert_eq!(error.code(), Some("NotFound"));
//! assert!(error.details().is_empty());
//! # Ok::<(), dataprotection_runtime::ConversionError>(())
//! ```

pub mod models;

pub use models::api202001_alpha::{
    DppResourceList, Error, ErrorAdditionalInfo, ProvisioningState, ResourceOperationGateKeeper,
    ResourceOperationGateKeeperResource, ResourceOperationGateKeeperResourceList,
};
pub use models::ExportJobsTriggerAcceptedResponseHeaders;
