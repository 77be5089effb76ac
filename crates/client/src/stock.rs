//! Stock-query port: the raw available-stock rows this crate translates.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use dispo_core::{DomainError, DomainResult, ProductId};

/// Selects the stock to compute. Opaque to the translator, which forwards it as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialQuery {
    /// Empty means all products.
    #[serde(default)]
    pub product_ids: Vec<ProductId>,
    /// Empty means all keys.
    #[serde(default)]
    pub storage_attributes_keys: Vec<String>,
    /// Stock as of this instant.
    pub date: DateTime<Utc>,
}

impl MaterialQuery {
    pub fn for_products(product_ids: impl IntoIterator<Item = ProductId>, date: DateTime<Utc>) -> Self {
        Self {
            product_ids: product_ids.into_iter().collect(),
            storage_attributes_keys: Vec::new(),
            date,
        }
    }
}

/// One raw row of an available-stock computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRow {
    pub product_id: ProductId,
    /// Already denominated in the product's stocking unit.
    pub qty: Decimal,
    pub storage_attributes_key: String,
}

/// Computes available stock for a query.
pub trait StockRepository: Send + Sync {
    fn retrieve_available_stock(&self, query: &MaterialQuery) -> DomainResult<Vec<StockRow>>;
}

impl<S> StockRepository for Arc<S>
where
    S: StockRepository + ?Sized,
{
    fn retrieve_available_stock(&self, query: &MaterialQuery) -> DomainResult<Vec<StockRow>> {
        (**self).retrieve_available_stock(query)
    }
}

/// A precomputed stock row valid from `date` on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(flatten)]
    pub row: StockRow,
    pub date: DateTime<Utc>,
}

/// In-memory stock repository for tests/dev.
///
/// Does not aggregate anything: returns the stored rows matching the query,
/// in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryStockRepository {
    records: RwLock<Vec<StockRecord>>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: impl IntoIterator<Item = StockRecord>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
        }
    }

    pub fn insert(&self, record: StockRecord) {
        if let Ok(mut records) = self.records.write() {
            records.push(record);
        }
    }
}

impl StockRepository for InMemoryStockRepository {
    fn retrieve_available_stock(&self, query: &MaterialQuery) -> DomainResult<Vec<StockRow>> {
        let records = self
            .records
            .read()
            .map_err(|_| DomainError::collaborator("stock records lock poisoned"))?;

        Ok(records
            .iter()
            .filter(|r| r.date <= query.date)
            .filter(|r| query.product_ids.is_empty() || query.product_ids.contains(&r.row.product_id))
            .filter(|r| {
                query.storage_attributes_keys.is_empty()
                    || query.storage_attributes_keys.contains(&r.row.storage_attributes_key)
            })
            .map(|r| r.row.clone())
            .collect())
    }
}
