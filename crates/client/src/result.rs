//! Client-facing available-stock result.

use serde::{Deserialize, Serialize};

use dispo_core::{ProductId, Quantity};
use dispo_products::AttributeValue;

use crate::storage_key::GroupKind;

/// Available stock of one product for one attribute scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub product_id: ProductId,
    /// Always in the product's stocking unit.
    pub quantity: Quantity,
    pub kind: GroupKind,
    /// Only ever non-empty for [`GroupKind::AttributeSet`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_values: Vec<AttributeValue>,
}

/// Groups in the order the stock-query returned their rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableStockResult {
    pub groups: Vec<Group>,
}

impl AvailableStockResult {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn groups_for(&self, product_id: ProductId) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(move |g| g.product_id == product_id)
    }
}
