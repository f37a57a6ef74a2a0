use super::ResourceOperationGateKeeper;
use async_trait::async_trait;
use dataprotection_runtime::convert::{to_string, to_string_map};
use dataprotection_runtime::validation::assert_object_is_valid;
use dataprotection_runtime::{
    write_field, Content, ConversionError, EventListener, Field, Model, SerializationMode,
    Validates,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

const ID: Field = Field::new("Id", "id")
    .read_only()
    .describe("Resource Id represents the complete path to the resource.");
const RESOURCE_NAME: Field = Field::new("Name", "name")
    .read_only()
    .describe("Resource name associated with the resource.");
const TYPE: Field = Field::new("Type", "type").read_only().describe(
    "Resource type represents the complete path of the form Namespace/ResourceType/ResourceType/...",
);
const E_TAG: Field = Field::new("ETag", "eTag").describe("Optional ETag.");
const LOCATION: Field = Field::new("Location", "location").describe("Resource location.");
const TAGS: Field = Field::new("Tag", "tags").describe("Resource tags.");
const PROPERTIES: Field =
    Field::new("Property", "properties").describe("ResourceOperationGateKeeperResource properties");

/// A tracked ARM resource wrapping a [`ResourceOperationGateKeeper`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceOperationGateKeeperResource {
    id: Option<String>,
    name: Option<String>,
    type_: Option<String>,
    e_tag: Option<String>,
    location: Option<String>,
    tags: Option<BTreeMap<String, String>>,
    properties: Option<ResourceOperationGateKeeper>,
}

impl ResourceOperationGateKeeperResource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.type_.as_deref()
    }

    pub fn e_tag(&self) -> Option<&str> {
        self.e_tag.as_deref()
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn tags(&self) -> Option<&BTreeMap<String, String>> {
        self.tags.as_ref()
    }

    pub fn properties(&self) -> Option<&ResourceOperationGateKeeper> {
        self.properties.as_ref()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_properties(mut self, properties: ResourceOperationGateKeeper) -> Self {
        self.properties = Some(properties);
        self
    }
}

impl Model for ResourceOperationGateKeeperResource {
    const NAME: &'static str = "ResourceOperationGateKeeperResource";
    const FIELDS: &'static [Field] = &[ID, RESOURCE_NAME, TYPE, E_TAG, LOCATION, TAGS, PROPERTIES];

    fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
        content.assign(&ID, &mut self.id, to_string)?;
        content.assign(&RESOURCE_NAME, &mut self.name, to_string)?;
        content.assign(&TYPE, &mut self.type_, to_string)?;
        content.assign(&E_TAG, &mut self.e_tag, to_string)?;
        content.assign(&LOCATION, &mut self.location, to_string)?;
        content.assign(&TAGS, &mut self.tags, to_string_map)?;
        content.assign(
            &PROPERTIES,
            &mut self.properties,
            ResourceOperationGateKeeper::convert_from,
        )?;
        Ok(())
    }

    fn write_json(&self, out: &mut Map<String, Value>, mode: SerializationMode) {
        write_field(out, &ID, self.id.clone().map(Value::from), mode);
        write_field(out, &RESOURCE_NAME, self.name.clone().map(Value::from), mode);
        write_field(out, &TYPE, self.type_.clone().map(Value::from), mode);
        write_field(out, &E_TAG, self.e_tag.clone().map(Value::from), mode);
        write_field(out, &LOCATION, self.location.clone().map(Value::from), mode);
        write_field(
            out,
            &TAGS,
            self.tags.as_ref().map(|tags| {
                Value::Object(
                    tags.iter()
                        .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
                        .collect(),
                )
            }),
            mode,
        );
        write_field(
            out,
            &PROPERTIES,
            self.properties.as_ref().map(|p| p.to_json_value(mode)),
            mode,
        );
    }
}

#[async_trait]
impl Validates for ResourceOperationGateKeeperResource {
    async fn validate(&self, listener: &dyn EventListener) {
        assert_object_is_valid(listener, "properties", self.properties.as_ref()).await;
    }
}
