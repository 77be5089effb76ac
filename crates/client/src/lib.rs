//! `dispo-client` — client-side view of available stock.
//!
//! Translates the raw rows of an available-stock computation into groups
//! clients can show: quantities in the product's stocking unit, and storage
//! attributes keys decoded into an attribute scope plus attribute values.

pub mod config;
pub mod fixture;
pub mod result;
pub mod service;
pub mod stock;
pub mod storage_key;

pub use config::TranslatorConfig;
pub use result::{AvailableStockResult, Group};
pub use service::AvailableStockService;
pub use stock::{InMemoryStockRepository, MaterialQuery, StockRecord, StockRepository, StockRow};
pub use storage_key::{
    DecodedKey, GroupKind, STORAGE_ATTRIBUTES_KEY_ALL, STORAGE_ATTRIBUTES_KEY_DELIMITER,
    STORAGE_ATTRIBUTES_KEY_OTHER, classify_key, decode_key, encode_key,
};
