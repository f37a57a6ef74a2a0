//! Models of the `2020-01-01-alpha` Data Protection API version.

mod dpp_resource_list;
mod error;
mod error_additional_info;
mod resource_operation_gate_keeper;
mod resource_operation_gate_keeper_resource;
mod resource_operation_gate_keeper_resource_list;

pub use dpp_resource_list::DppResourceList;
pub use error::Error;
pub use error_additional_info::ErrorAdditionalInfo;
pub use resource_operation_gate_keeper::{ProvisioningState, ResourceOperationGateKeeper};
pub use resource_operation_gate_keeper_resource::ResourceOperationGateKeeperResource;
pub use resource_operation_gate_keeper_resource_list::ResourceOperationGateKeeperResourceList;
