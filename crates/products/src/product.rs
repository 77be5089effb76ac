use serde::{Deserialize, Serialize};

use dispo_core::{DomainError, DomainResult, Entity, ProductId, Uom};

/// Product master record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    value: String,
    name: String,
    stocking_uom: Uom,
}

impl Product {
    /// `value` is the product's search key (what users type), `name` its display name.
    pub fn new(
        id: ProductId,
        value: impl Into<String>,
        name: impl Into<String>,
        stocking_uom: Uom,
    ) -> DomainResult<Self> {
        let value = value.into();
        let name = name.into();
        if value.trim().is_empty() {
            return Err(DomainError::validation("product value cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        Ok(Self {
            id,
            value,
            name,
            stocking_uom,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit in which this product's stock quantities are reported.
    pub fn stocking_uom(&self) -> &Uom {
        &self.stocking_uom
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
