use async_trait::async_trait;
use dataprotection_runtime::convert::to_string;
use dataprotection_runtime::{
    write_field, Content, ConversionError, EventListener, Field, Model, SerializationMode,
    Validates,
};
use serde_json::{Map, Value};

pub(crate) const NEXT_LINK: Field = Field::new("NextLink", "nextLink").describe(
    "The uri to fetch the next page of resources. Call ListNext() fetches next page of resources.",
);

/// Paging base shared by every list response of the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DppResourceList {
    next_link: Option<String>,
}

impl DppResourceList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continuation URI for the next page; `None` on the last page.
    pub fn next_link(&self) -> Option<&str> {
        self.next_link.as_deref()
    }

    pub fn set_next_link(&mut self, next_link: Option<String>) {
        self.next_link = next_link;
    }
}

impl Model for DppResourceList {
    const NAME: &'static str = "DppResourceList";
    const FIELDS: &'static [Field] = &[NEXT_LINK];

    fn populate(&mut self, content: &dyn Content) -> Result<(), ConversionError> {
        content.assign(&NEXT_LINK, &mut self.next_link, to_string)
    }

    fn write_json(&self, out: &mut Map<String, Value>, mode: SerializationMode) {
        write_field(out, &NEXT_LINK, self.next_link.clone().map(Value::from), mode);
    }
}

// No constraints of its own.
#[async_trait]
impl Validates for DppResourceList {
    async fn validate(&self, _listener: &dyn EventListener) {}
}
