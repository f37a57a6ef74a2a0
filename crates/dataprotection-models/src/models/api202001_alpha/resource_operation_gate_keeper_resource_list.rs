use super::dpp_resource_list::NEXT_LINK;
use super::{DppResourceList, ResourceOperationGateKeeperResource};
use async_trait::async_trait;
use dataprotection_runtime::convert::array_of;
use dataprotection_runtime::validation::assert_object_is_valid;
use dataprotection_runtime::{
    models_json, write_field, Content, ConversionError, EventListener, Field, Model,
    SerializationMode, Validates,
};
use serde_json::{Map, Value};

const VALUE: Field =
    Field::new("Value", "value").describe("List of ResourceGuardProxyBase resources");

/// One page of ResourceOperationGateKeeper resources.
///
/// Paging comes from the composed [`DppResourceList`]; its `nextLink` is read and written
/// alongside `value` as if both were declared here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceOperationGateKeeperResourceList {
    base: DppResourceList,
    value: Option<Vec<ResourceOperationGateKeeperResource>>,
}

impl ResourceOperationGateKeeperResourceList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_link(&self) -> Option<&str> {
        self.base.next_link()
    }

    pub fn has_next_page(&self) -> bool {
        self.next_link().is_some_and(|link| !link.is_empty())
    }

    /// Resources on this page. Empty when the service sent none.
    pub fn value(&self) -> &[ResourceOperationGateKeeperResource] {
        self.value.as_deref().unwrap_or_default()
    }

    pub fn into_value(self) -> Vec<ResourceOperationGateKeeperResource> {
        self.value.unwrap_or_default()
    }

    pub fn base(&self) -> &DppResourceList {
        &self.base
    }

    pub fn with_next_link(mut self, next_link: impl Into<String>) -> Self {
        self.base.set_next_link(Some(next_link.into()));
        self
    }

    pub fn with_value(mut self, value: Vec<ResourceOperationGateKeeperResource>) -> Self {
        self.value = Some(value);
        self
    }
}

impl Model for ResourceOperationGateKeeperResourceList {
    const NAME: &'static str = "ResourceOperationGateKeeperResourceList";
    const FIELDS: &'static [Field] = &[NEXT_LINK, VALUE];

    fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
        self.base.populate(content)?;
        content.assign(
            &VALUE,
            &mut self.value,
            array_of(ResourceOperationGateKeeperResource::convert_from),
        )?;
        Ok(())
    }

    fn write_json(&self, out: &mut Map<String, Value>, mode: SerializationMode) {
        self.base.write_json(out, mode);
        write_field(out, &VALUE, models_json(self.value.as_deref(), mode), mode);
    }
}

#[async_trait]
impl Validates for ResourceOperationGateKeeperResourceList {
    async fn validate(&self, listener: &dyn EventListener) {
        self.base.validate(listener).await;
        for (i, resource) in self.value().iter().enumerate() {
            assert_object_is_valid(listener, &format!("value[{i}]"), Some(resource)).await;
        }
    }
}
