use serde::{Deserialize, Serialize};

use dispo_core::{AttributeValueId, DomainError, DomainResult, Entity};

/// One value of a product attribute (e.g. `Color = Red`, `Label = Bio`).
///
/// Stock lots of the same product are told apart by the set of attribute
/// values they carry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttributeValue {
    id: AttributeValueId,
    attribute: String,
    value: String,
}

impl AttributeValue {
    pub fn new(
        id: AttributeValueId,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> DomainResult<Self> {
        let attribute = attribute.into();
        if attribute.trim().is_empty() {
            return Err(DomainError::validation("attribute name cannot be empty"));
        }
        Ok(Self {
            id,
            attribute,
            value: value.into(),
        })
    }

    pub fn id_typed(&self) -> AttributeValueId {
        self.id
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Entity for AttributeValue {
    type Id = AttributeValueId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
