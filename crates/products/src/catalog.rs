//! Master data lookup ports and in-memory catalogs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use dispo_core::{AttributeValueId, DomainError, DomainResult, Entity, ProductId, Uom};

use crate::attribute::AttributeValue;
use crate::product::Product;

/// Resolves the stocking unit of a product.
pub trait StockingUnitResolver: Send + Sync {
    /// Fails with a `Lookup` error if the product does not exist.
    fn stocking_unit(&self, product_id: ProductId) -> DomainResult<Uom>;
}

/// Resolves an attribute value master record by id.
pub trait AttributeValueResolver: Send + Sync {
    /// Fails with a `Lookup` error if no attribute value has this id.
    fn attribute_value(&self, id: AttributeValueId) -> DomainResult<AttributeValue>;
}

impl<S> StockingUnitResolver for Arc<S>
where
    S: StockingUnitResolver + ?Sized,
{
    fn stocking_unit(&self, product_id: ProductId) -> DomainResult<Uom> {
        (**self).stocking_unit(product_id)
    }
}

impl<S> AttributeValueResolver for Arc<S>
where
    S: AttributeValueResolver + ?Sized,
{
    fn attribute_value(&self, id: AttributeValueId) -> DomainResult<AttributeValue> {
        (**self).attribute_value(id)
    }
}

/// Master records keyed by their entity id, counting reads.
#[derive(Debug)]
struct EntityStore<E: Entity> {
    inner: RwLock<HashMap<E::Id, E>>,
    lookups: AtomicUsize,
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            lookups: AtomicUsize::new(0),
        }
    }
}

impl<E: Entity + Clone> EntityStore<E> {
    fn upsert(&self, entity: E) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(entity.id().clone(), entity);
        }
    }

    fn get(&self, id: &E::Id) -> Option<E> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    /// Like `get`, but counted as a port lookup.
    fn lookup(&self, id: &E::Id) -> Option<E> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.get(id)
    }

    fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

/// In-memory product master data for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductCatalog {
    store: EntityStore<Product>,
}

impl InMemoryProductCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let catalog = Self::new();
        for product in products {
            catalog.upsert(product);
        }
        catalog
    }

    pub fn upsert(&self, product: Product) {
        self.store.upsert(product);
    }

    pub fn get(&self, product_id: ProductId) -> Option<Product> {
        self.store.get(&product_id)
    }

    /// Number of `stocking_unit` calls served so far.
    pub fn lookup_count(&self) -> usize {
        self.store.lookup_count()
    }
}

impl StockingUnitResolver for InMemoryProductCatalog {
    fn stocking_unit(&self, product_id: ProductId) -> DomainResult<Uom> {
        self.store
            .lookup(&product_id)
            .map(|p| p.stocking_uom().clone())
            .ok_or_else(|| DomainError::lookup("product", product_id))
    }
}

/// In-memory attribute value master data for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryAttributeCatalog {
    store: EntityStore<AttributeValue>,
}

impl InMemoryAttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: impl IntoIterator<Item = AttributeValue>) -> Self {
        let catalog = Self::new();
        for value in values {
            catalog.upsert(value);
        }
        catalog
    }

    pub fn upsert(&self, value: AttributeValue) {
        self.store.upsert(value);
    }

    /// Number of `attribute_value` calls served so far.
    pub fn lookup_count(&self) -> usize {
        self.store.lookup_count()
    }
}

impl AttributeValueResolver for InMemoryAttributeCatalog {
    fn attribute_value(&self, id: AttributeValueId) -> DomainResult<AttributeValue> {
        match self.store.lookup(&id) {
            Some(value) => Ok(value),
            None => {
                tracing::debug!(attribute_value_id = %id, "attribute value not found");
                Err(DomainError::lookup("attribute value", id))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dispo_core::{ErrorKind, UomId};

    fn pce() -> Uom {
        Uom::new(UomId::new(100), "PCE").unwrap()
    }

    #[test]
    fn resolves_stocking_unit_of_known_product() {
        let catalog = InMemoryProductCatalog::with_products([
            Product::new(ProductId::new(10), "P-10", "Bolt", pce()).unwrap(),
        ]);

        assert_eq!(catalog.stocking_unit(ProductId::new(10)).unwrap(), pce());
        assert_eq!(catalog.lookup_count(), 1);
    }

    #[test]
    fn unknown_product_is_a_lookup_error() {
        let catalog = InMemoryProductCatalog::new();
        let err = catalog.stocking_unit(ProductId::new(99)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::Lookup {
                entity: "product",
                id: "99".to_string()
            }
        );
    }

    #[test]
    fn upsert_replaces_existing_record() {
        let catalog = InMemoryProductCatalog::new();
        catalog.upsert(Product::new(ProductId::new(1), "P-1", "Old", pce()).unwrap());
        catalog.upsert(Product::new(ProductId::new(1), "P-1", "New", pce()).unwrap());
        assert_eq!(catalog.get(ProductId::new(1)).unwrap().name(), "New");
    }

    #[test]
    fn attribute_values_are_keyed_by_entity_id() {
        let catalog = InMemoryAttributeCatalog::new();
        catalog.upsert(AttributeValue::new(AttributeValueId::new(5), "Color", "Red").unwrap());
        catalog.upsert(AttributeValue::new(AttributeValueId::new(5), "Color", "Blue").unwrap());
        catalog.upsert(AttributeValue::new(AttributeValueId::new(6), "Color", "Green").unwrap());

        assert_eq!(catalog.attribute_value(AttributeValueId::new(5)).unwrap().value(), "Blue");
        assert_eq!(catalog.attribute_value(AttributeValueId::new(6)).unwrap().value(), "Green");
    }

    #[test]
    fn get_does_not_count_as_lookup() {
        let catalog = InMemoryProductCatalog::with_products([
            Product::new(ProductId::new(3), "P-3", "Nut", pce()).unwrap(),
        ]);

        assert!(catalog.get(ProductId::new(3)).is_some());
        assert_eq!(catalog.lookup_count(), 0);
    }

    #[test]
    fn resolves_attribute_values_through_arc() {
        let catalog = Arc::new(InMemoryAttributeCatalog::with_values([
            AttributeValue::new(AttributeValueId::new(12), "Color", "Red").unwrap(),
        ]));

        let resolver: &dyn AttributeValueResolver = &catalog;
        assert_eq!(resolver.attribute_value(AttributeValueId::new(12)).unwrap().value(), "Red");
        assert!(resolver.attribute_value(AttributeValueId::new(13)).is_err());
        assert_eq!(catalog.lookup_count(), 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every stored product resolves to its own stocking unit.
            #[test]
            fn stored_products_resolve(ids in proptest::collection::hash_set(any::<i32>(), 1..20)) {
                let products: Vec<Product> = ids
                    .iter()
                    .map(|id| {
                        let uom = Uom::new(UomId::new(*id), format!("U{id}")).unwrap();
                        Product::new(ProductId::new(*id), format!("P{id}"), "Product", uom).unwrap()
                    })
                    .collect();
                let catalog = InMemoryProductCatalog::with_products(products);

                for id in &ids {
                    let uom = catalog.stocking_unit(ProductId::new(*id)).unwrap();
                    prop_assert_eq!(uom.id(), UomId::new(*id));
                }
            }
        }
    }
}
