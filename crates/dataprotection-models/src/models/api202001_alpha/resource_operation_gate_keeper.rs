use async_trait::async_trait;
use dataprotection_runtime::convert::{array_of, to_string};
use dataprotection_runtime::{
    write_field, Content, ConversionError, EventListener, Field, Model, SerializationMode,
    Validates,
};
use serde_json::{Map, Value};
use std::fmt;

const DESCRIPTION: Field = Field::new("Description", "description")
    .describe("Description about the pre-req steps to perform all the critical operations.");
const PROVISIONING_STATE: Field = Field::new("ProvisioningState", "provisioningState")
    .read_only()
    .describe("Provisioning state of the BackupVault resource");
const VAULT_CRITICAL_OPERATION_EXCLUSION_LIST: Field = Field::new(
    "VaultCriticalOperationExclusionList",
    "vaultCriticalOperationExclusionList",
)
.describe("List of critical operations which are not protected by this resourceGuard");

/// Provisioning state reported by the service.
///
/// Values the client does not know yet are kept verbatim in [`ProvisioningState::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningState {
    Failed,
    Provisioning,
    Succeeded,
    Unknown,
    Updating,
    Other(String),
}

impl ProvisioningState {
    pub fn as_str(&self) -> &str {
        match self {
            ProvisioningState::Failed => "Failed",
            ProvisioningState::Provisioning => "Provisioning",
            ProvisioningState::Succeeded => "Succeeded",
            ProvisioningState::Unknown => "Unknown",
            ProvisioningState::Updating => "Updating",
            ProvisioningState::Other(other) => other,
        }
    }

    /// Whether the resource has reached a final state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProvisioningState::Failed | ProvisioningState::Succeeded)
    }
}

impl From<String> for ProvisioningState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Failed" => ProvisioningState::Failed,
            "Provisioning" => ProvisioningState::Provisioning,
            "Succeeded" => ProvisioningState::Succeeded,
            "Unknown" => ProvisioningState::Unknown,
            "Updating" => ProvisioningState::Updating,
            _ => ProvisioningState::Other(value),
        }
    }
}

impl fmt::Display for ProvisioningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Properties of a ResourceOperationGateKeeper (resource guard) resource.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceOperationGateKeeper {
    description: Option<String>,
    provisioning_state: Option<ProvisioningState>,
    vault_critical_operation_exclusion_list: Option<Vec<String>>,
}

impl ResourceOperationGateKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn provisioning_state(&self) -> Option<&ProvisioningState> {
        self.provisioning_state.as_ref()
    }

    pub fn vault_critical_operation_exclusion_list(&self) -> &[String] {
        self.vault_critical_operation_exclusion_list
            .as_deref()
            .unwrap_or_default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_provisioning_state(mut self, state: ProvisioningState) -> Self {
        self.provisioning_state = Some(state);
        self
    }

    pub fn with_vault_critical_operation_exclusion_list(mut self, operations: Vec<String>) -> Self {
        self.vault_critical_operation_exclusion_list = Some(operations);
        self
    }
}

impl Model for ResourceOperationGateKeeper {
    const NAME: &'static str = "ResourceOperationGateKeeper";
    const FIELDS: &'static [Field] = &[
        DESCRIPTION,
        PROVISIONING_STATE,
        VAULT_CRITICAL_OPERATION_EXCLUSION_LIST,
    ];

    fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
        content.assign(&DESCRIPTION, &mut self.description, to_string)?;
        content.assign(&PROVISIONING_STATE, &mut self.provisioning_state, |raw| {
            to_string(raw).map(ProvisioningState::from)
        })?;
        content.assign(
            &VAULT_CRITICAL_OPERATION_EXCLUSION_LIST,
            &mut self.vault_critical_operation_exclusion_list,
            array_of(to_string),
        )?;
        Ok(())
    }

    fn write_json(&self, out: &mut Map<String, Value>, mode: SerializationMode) {
        write_field(out, &DESCRIPTION, self.description.clone().map(Value::from), mode);
        write_field(
            out,
            &PROVISIONING_STATE,
            self.provisioning_state
                .as_ref()
                .map(|s| Value::from(s.as_str())),
            mode,
        );
        write_field(
            out,
            &VAULT_CRITICAL_OPERATION_EXCLUSION_LIST,
            self.vault_critical_operation_exclusion_list
                .clone()
                .map(Value::from),
            mode,
        );
    }
}

// No constraints of its own.
#[async_trait]
impl Validates for ResourceOperationGateKeeper {
    async fn validate(&self, _listener: &dyn EventListener) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provisioning_state_is_kept() {
        let state = ProvisioningState::from("Deleting".to_string());
        assert_eq!(state, ProvisioningState::Other("Deleting".into()));
        assert_eq!(state.to_string(), "Deleting");
        assert!(!state.is_terminal());
        assert!(ProvisioningState::from("Succeeded".to_string()).is_terminal());
    }
}
