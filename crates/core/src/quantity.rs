//! Units of measure and quantities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::id::UomId;

/// Unit of measure (e.g. `PCE`, `KGM`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uom {
    id: UomId,
    symbol: String,
}

impl Uom {
    pub fn new(id: UomId, symbol: impl Into<String>) -> DomainResult<Self> {
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(DomainError::validation("uom symbol cannot be empty"));
        }
        Ok(Self { id, symbol })
    }

    pub fn id(&self) -> UomId {
        self.id
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}

/// A decimal amount expressed in a unit of measure.
///
/// Construction only attaches the unit; no conversion ever happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    value: Decimal,
    uom: Uom,
}

impl Quantity {
    pub fn of(value: Decimal, uom: Uom) -> Self {
        Self { value, uom }
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn uom(&self) -> &Uom {
        &self.uom
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.value, self.uom.symbol)
    }
}
