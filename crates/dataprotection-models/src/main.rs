//! # Data Protection Models Demo
//!
//! Walks through the model layer end to end:
//! 1.  Parsing an error response from wire JSON and walking its details.
//! 2.  Building a page of resource guards from a shell pipeline object.
//! 3.  Validating the page with a [`ValidationReport`].
//! 4.  Reading the `202 Accepted` headers of an export-jobs trigger.
//!
//! Run with `RUST_LOG=debug` to see the adapter's log events.

use dataprotection_models::{
    Error, ExportJobsTriggerAcceptedResponseHeaders, ResourceOperationGateKeeperResourceList,
};
use dataprotection_runtime::tracing::setup_tracing;
use dataprotection_runtime::{
    ConversionError, Model, SerializationMode, ShellObject, ShellValue, ValidationReport,
    Validates,
};
use tracing::{info, warn};

const ERROR_RESPONSE: &str = r#"{
    "code": "UserErrorVaultCriticalOperationBlocked",
    "message": "Operation blocked by resource guard",
    "target": "backupVaults/vault1",
    "details": [
        {"code": "ResourceGuardMissing", "message": "No resource guard found"}
    ],
    "additionalInfo": [
        {"type": "PolicyViolation", "info": {"policy": "deny-delete"}}
    ]
}"#;

#[tokio::main]
async fn main() -> Result<(), ConversionError> {
    setup_tracing();

    info!("Starting data protection models demo");

    // Error responses nest arbitrarily deep
    let error = Error::from_json_string(ERROR_RESPONSE)?;
    for nested in error.iter() {
        info!(error = %nested, "Error response entry");
    }

    // A list page as it arrives from a shell pipeline
    let guard = ShellObject::new()
        .with_type_name("Microsoft.Azure.PowerShell.Cmdlets.DataProtection.Models.ResourceOperationGateKeeper")
        .with_property("Description", "Protects vault deletion")
        .with_property("ProvisioningState", "Succeeded")
        .with_property(
            "VaultCriticalOperationExclusionList",
            ShellValue::List(vec!["Microsoft.DataProtection/backupVaults/write".into()]),
        );
    let page_input = ShellObject::new()
        .with_property("NextLink", "https://management.azure.com/resourceGuards?page=2")
        .with_property(
            "Value",
            ShellValue::List(vec![
                ShellObject::new()
                    .with_property("Name", "guard1")
                    .with_property("Location", "westus")
                    .with_property("Property", guard)
                    .into(),
                ShellObject::new().with_property("Name", "guard2").into(),
            ]),
        );
    let page = ResourceOperationGateKeeperResourceList::from_shell_object(&page_input)?;
    info!(
        resources = page.value().len(),
        has_next_page = page.has_next_page(),
        "Resource guard page loaded"
    );

    let report = ValidationReport::new();
    page.validate(&report).await;
    for event in report.events() {
        warn!(property = %event.property, message = %event.message, "Validation issue");
    }

    info!(
        json = %page.to_json_string_with(SerializationMode::SetOnly),
        "Resource guard page as JSON"
    );

    // Accepted-response headers
    let headers = ExportJobsTriggerAcceptedResponseHeaders::from_headers([
        ("Location", "https://management.azure.com/operationStatus/42"),
        ("Retry-After", "60"),
    ]);
    info!(
        location = headers.location().unwrap_or_default(),
        retry_after = headers.retry_after(),
        "Export jobs trigger accepted"
    );

    info!("Demo completed successfully");
    Ok(())
}
