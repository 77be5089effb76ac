//! Product and attribute master data.
//!
//! Holds the master records the available-stock translation looks up, and the
//! narrow lookup ports it reads them through. No IO, no storage: real
//! deployments implement the ports over their own master data source.

pub mod attribute;
pub mod catalog;
pub mod product;

pub use attribute::AttributeValue;
pub use catalog::{
    AttributeValueResolver, InMemoryAttributeCatalog, InMemoryProductCatalog, StockingUnitResolver,
};
pub use product::Product;
