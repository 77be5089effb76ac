//! JSON fixtures for running the translator against in-memory master data.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use serde::Deserialize;
use thiserror::Error;

use dispo_core::{AttributeValueId, DomainError, ProductId, Uom, UomId};
use dispo_products::{AttributeValue, InMemoryAttributeCatalog, InMemoryProductCatalog, Product};

use crate::config::TranslatorConfig;
use crate::result::AvailableStockResult;
use crate::service::AvailableStockService;
use crate::stock::{InMemoryStockRepository, MaterialQuery, StockRecord};

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse fixture: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid master data in fixture: {0}")]
    Invalid(#[from] DomainError),
}

#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    pub id: ProductId,
    pub value: String,
    pub name: String,
    pub uom_id: UomId,
    pub uom_symbol: String,
}

#[derive(Debug, Deserialize)]
pub struct AttributeValueFixture {
    pub id: AttributeValueId,
    pub attribute: String,
    pub value: String,
}

/// Master data, stock records and the query to run.
#[derive(Debug, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub products: Vec<ProductFixture>,
    #[serde(default)]
    pub attribute_values: Vec<AttributeValueFixture>,
    #[serde(default)]
    pub stock: Vec<StockRecord>,
    pub query: MaterialQuery,
}

pub type FixtureService = AvailableStockService<
    Arc<InMemoryStockRepository>,
    Arc<InMemoryProductCatalog>,
    Arc<InMemoryAttributeCatalog>,
>;

impl Fixture {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Build a service over in-memory copies of the fixture's data.
    pub fn service(&self, config: TranslatorConfig) -> Result<FixtureService, FixtureError> {
        let products = InMemoryProductCatalog::new();
        for p in &self.products {
            let uom = Uom::new(p.uom_id, p.uom_symbol.clone())?;
            products.upsert(Product::new(p.id, p.value.clone(), p.name.clone(), uom)?);
        }

        let attributes = InMemoryAttributeCatalog::new();
        for av in &self.attribute_values {
            attributes.upsert(AttributeValue::new(av.id, av.attribute.clone(), av.value.clone())?);
        }

        let stock = InMemoryStockRepository::with_records(self.stock.iter().cloned());

        Ok(AvailableStockService::with_config(
            Arc::new(stock),
            Arc::new(products),
            Arc::new(attributes),
            config,
        ))
    }

    /// Run the fixture's query; failures keep the whole context chain.
    pub fn retrieve(&self, config: TranslatorConfig) -> anyhow::Result<AvailableStockResult> {
        let service = self.service(config)?;
        service
            .retrieve_available_stock(&self.query)
            .context("could not compute available stock")
    }
}
