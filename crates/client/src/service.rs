//! Available stock translation.
//!
//! Turns the raw rows of a stock-query into client groups:
//! - attaches each product's stocking unit to the row quantity (no conversion)
//! - decodes the storage attributes key into a [`GroupKind`]
//! - resolves packed attribute value ids to master records, in key order
//!
//! A failing row aborts the whole call; the error carries the row's context.

use std::collections::HashMap;

use dispo_core::{DomainResult, ProductId, Quantity, ResultExt, Uom};
use dispo_products::{AttributeValue, AttributeValueResolver, StockingUnitResolver};

use crate::config::TranslatorConfig;
use crate::result::{AvailableStockResult, Group};
use crate::stock::{MaterialQuery, StockRepository, StockRow};
use crate::storage_key::{GroupKind, decode_key};

/// Client-side available stock service.
#[derive(Debug)]
pub struct AvailableStockService<R, U, A>
where
    R: StockRepository,
    U: StockingUnitResolver,
    A: AttributeValueResolver,
{
    stock: R,
    units: U,
    attributes: A,
    config: TranslatorConfig,
}

impl<R, U, A> AvailableStockService<R, U, A>
where
    R: StockRepository,
    U: StockingUnitResolver,
    A: AttributeValueResolver,
{
    pub fn new(stock: R, units: U, attributes: A) -> Self {
        Self::with_config(stock, units, attributes, TranslatorConfig::default())
    }

    pub fn with_config(stock: R, units: U, attributes: A, config: TranslatorConfig) -> Self {
        Self {
            stock,
            units,
            attributes,
            config,
        }
    }

    /// Compute available stock for `query` and translate it for clients.
    pub fn retrieve_available_stock(&self, query: &MaterialQuery) -> DomainResult<AvailableStockResult> {
        let rows = self.stock.retrieve_available_stock(query)?;

        let mut units = UnitCache::new(&self.units, self.config.memoize_stocking_units);
        let mut groups = Vec::with_capacity(rows.len());
        for (index, row) in rows.iter().enumerate() {
            let group = self
                .create_group(row, &mut units)
                .context("row_index", index)
                .context("product_id", row.product_id)
                .with_context("storage_attributes_key", || format!("{:?}", row.storage_attributes_key))?;
            groups.push(group);
        }

        tracing::info!(
            rows = rows.len(),
            unit_lookups = units.lookups,
            "translated available stock"
        );
        Ok(AvailableStockResult { groups })
    }

    fn create_group(&self, row: &StockRow, units: &mut UnitCache<'_, U>) -> DomainResult<Group> {
        let uom = units.stocking_unit(row.product_id)?;
        let quantity = Quantity::of(row.qty, uom);

        let decoded = decode_key(&row.storage_attributes_key)?;
        let attribute_values = match decoded.kind {
            GroupKind::AttributeSet => decoded
                .attribute_value_ids
                .iter()
                .map(|&id| self.attributes.attribute_value(id).context("attribute_value_id", id))
                .collect::<DomainResult<Vec<AttributeValue>>>()?,
            GroupKind::AllStorageKeys | GroupKind::OtherStorageKeys => Vec::new(),
        };

        tracing::debug!(
            product_id = %row.product_id,
            kind = ?decoded.kind,
            attribute_values = attribute_values.len(),
            "created available stock group"
        );

        Ok(Group {
            product_id: row.product_id,
            quantity,
            kind: decoded.kind,
            attribute_values,
        })
    }
}

/// Per-call stocking unit lookups, optionally memoized by product.
struct UnitCache<'a, U> {
    resolver: &'a U,
    memo: Option<HashMap<ProductId, Uom>>,
    lookups: usize,
}

impl<'a, U: StockingUnitResolver> UnitCache<'a, U> {
    fn new(resolver: &'a U, memoize: bool) -> Self {
        Self {
            resolver,
            memo: memoize.then(HashMap::new),
            lookups: 0,
        }
    }

    fn stocking_unit(&mut self, product_id: ProductId) -> DomainResult<Uom> {
        if let Some(uom) = self.memo.as_ref().and_then(|m| m.get(&product_id)) {
            return Ok(uom.clone());
        }

        self.lookups += 1;
        let uom = self.resolver.stocking_unit(product_id)?;
        if let Some(memo) = self.memo.as_mut() {
            memo.insert(product_id, uom.clone());
        }
        Ok(uom)
    }
}
