use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use stockledger_core::{InventoryError, InventoryResult};

use crate::movement::{Movement, MovementKind};
use crate::product::Product;
use crate::snapshot::Snapshot;

/// Aggregate owning the product set and the movement ledger.
///
/// - Products keep insertion order and are keyed by their unique `code`.
/// - The ledger is append-only and gets exactly one entry per successful
///   stock operation.
/// - Every operation validates before it mutates, so a failed call leaves
///   both products and ledger untouched.
///
/// The catalog does no locking. Embedders with concurrent callers must
/// serialize mutating calls (e.g. behind one `Mutex<Catalog>`).
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
    ledger: Vec<Movement>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Every product, including inactive ones, in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Full ledger, oldest first.
    pub fn ledger(&self) -> &[Movement] {
        &self.ledger
    }

    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// Add a product. Codes are matched exactly (case-sensitive).
    pub fn register(&mut self, product: Product) -> InventoryResult<&Product> {
        if self.contains(product.code()) {
            return Err(InventoryError::duplicate(product.code()));
        }

        tracing::debug!(code = product.code(), name = product.name(), "product registered");

        let slot = self.products.len();
        self.index.insert(product.code().to_string(), slot);
        self.products.push(product);
        Ok(&self.products[slot])
    }

    pub fn find(&self, code: &str) -> InventoryResult<&Product> {
        self.slot(code).map(|slot| &self.products[slot])
    }

    /// Products whose name contains `needle`, ignoring case, in insertion order.
    ///
    /// The returned iterator is lazy and `Clone`, so it can be walked again.
    pub fn search_by_name(&self, needle: &str) -> impl Iterator<Item = &Product> + Clone + '_ {
        let needle = needle.to_lowercase();
        self.products
            .iter()
            .filter(move |p| p.name().to_lowercase().contains(&needle))
    }

    pub fn active_products(&self) -> impl Iterator<Item = &Product> + Clone + '_ {
        self.products.iter().filter(|p| p.is_active())
    }

    /// The last `limit` ledger entries, most recent first.
    pub fn movements(&self, limit: usize) -> impl Iterator<Item = &Movement> + '_ {
        self.ledger.iter().rev().take(limit)
    }

    pub fn receive_stock(&mut self, code: &str, quantity: i64) -> InventoryResult<&Product> {
        self.receive_stock_at(code, quantity, Utc::now())
    }

    /// Increase stock and record an inbound movement stamped `at`.
    pub fn receive_stock_at(
        &mut self,
        code: &str,
        quantity: i64,
        at: DateTime<Utc>,
    ) -> InventoryResult<&Product> {
        let quantity = positive(quantity)?;
        let slot = self.slot(code)?;

        let available = self.products[slot].stock_quantity();
        if available.checked_add(quantity).is_none() {
            return Err(InventoryError::StockOverflow {
                code: code.to_string(),
                available,
                requested: quantity,
            });
        }
        let movement = Movement::new(code, MovementKind::Inbound, quantity, at)?;

        let product = &mut self.products[slot];
        product.add_stock(quantity);
        self.ledger.push(movement);

        tracing::debug!(code, quantity, stock = product.stock_quantity(), "stock received");
        Ok(&self.products[slot])
    }

    pub fn issue_stock(&mut self, code: &str, quantity: i64) -> InventoryResult<&Product> {
        self.issue_stock_at(code, quantity, Utc::now())
    }

    /// Decrease stock and record an outbound movement stamped `at`.
    ///
    /// Never issues partially. The returned product tells the caller whether
    /// it is now low on stock; that is advisory and not an error.
    pub fn issue_stock_at(
        &mut self,
        code: &str,
        quantity: i64,
        at: DateTime<Utc>,
    ) -> InventoryResult<&Product> {
        let quantity = positive(quantity)?;
        let slot = self.slot(code)?;

        let available = self.products[slot].stock_quantity();
        if quantity > available {
            return Err(InventoryError::InsufficientStock {
                code: code.to_string(),
                available,
                requested: quantity,
            });
        }
        let movement = Movement::new(code, MovementKind::Outbound, quantity, at)?;

        let product = &mut self.products[slot];
        product.remove_stock(quantity);
        self.ledger.push(movement);

        tracing::debug!(code, quantity, stock = product.stock_quantity(), "stock issued");
        if product.is_low_stock() {
            tracing::warn!(
                code,
                stock = product.stock_quantity(),
                threshold = product.reorder_threshold(),
                "product is low on stock"
            );
        }
        Ok(&self.products[slot])
    }

    pub fn set_price(&mut self, code: &str, new_price: Decimal) -> InventoryResult<&Product> {
        let product = self.find_mut(code)?;
        product.set_price(new_price)?;
        Ok(&*product)
    }

    pub fn rename(&mut self, code: &str, name: &str) -> InventoryResult<&Product> {
        let product = self.find_mut(code)?;
        product.rename(name)?;
        Ok(&*product)
    }

    pub fn set_reorder_threshold(&mut self, code: &str, value: i64) -> InventoryResult<&Product> {
        let product = self.find_mut(code)?;
        product.set_reorder_threshold(value)?;
        Ok(&*product)
    }

    /// Soft-delete. Idempotent.
    pub fn deactivate(&mut self, code: &str) -> InventoryResult<&Product> {
        let product = self.find_mut(code)?;
        product.set_active(false);
        Ok(&*product)
    }

    /// Idempotent.
    pub fn activate(&mut self, code: &str) -> InventoryResult<&Product> {
        let product = self.find_mut(code)?;
        product.set_active(true);
        Ok(&*product)
    }

    /// Overwrite every mutable field of an existing product with `incoming`.
    ///
    /// Used by reconciliation imports. Stock set this way is not a movement
    /// and is not recorded in the ledger.
    pub fn overwrite(&mut self, incoming: Product) -> InventoryResult<&Product> {
        let product = self.find_mut(incoming.code())?;
        product.overwrite_from(incoming);
        Ok(&*product)
    }

    /// Drop every product. The ledger is left as it is.
    pub fn clear_products(&mut self) {
        tracing::debug!(removed = self.products.len(), "product set cleared");
        self.products.clear();
        self.index.clear();
    }

    /// Append an externally sourced ledger entry (e.g. restored from a backup).
    ///
    /// The referenced product must exist. Stock is not adjusted: the entry
    /// describes a change that already happened.
    pub fn record_movement(&mut self, movement: Movement) -> InventoryResult<()> {
        self.slot(movement.product_code())?;
        self.ledger.push(movement);
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.snapshot_at(Utc::now())
    }

    pub fn snapshot_at(&self, taken_at: DateTime<Utc>) -> Snapshot<'_> {
        Snapshot::new(&self.products, &self.ledger, taken_at)
    }

    fn slot(&self, code: &str) -> InventoryResult<usize> {
        self.index
            .get(code)
            .copied()
            .ok_or_else(|| InventoryError::not_found(code))
    }

    fn find_mut(&mut self, code: &str) -> InventoryResult<&mut Product> {
        let slot = self.slot(code)?;
        Ok(&mut self.products[slot])
    }
}

fn positive(quantity: i64) -> InventoryResult<u64> {
    if quantity <= 0 {
        return Err(InventoryError::InvalidQuantity(quantity));
    }
    Ok(quantity as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use stockledger_core::ValidationError;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 10, minute, 0).unwrap()
    }

    fn product(code: &str, name: &str, price_cents: i64, stock: i64) -> Product {
        Product::new(code, name, Decimal::new(price_cents, 2), stock, 5).unwrap()
    }

    fn catalog_with_widget() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.register(product("P1", "Widget", 1000, 20)).unwrap();
        catalog
    }

    #[test]
    fn register_then_find() {
        let catalog = catalog_with_widget();
        assert_eq!(catalog.find("P1").unwrap().name(), "Widget");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn register_rejects_duplicate_code_and_keeps_size() {
        let mut catalog = catalog_with_widget();
        let err = catalog.register(product("P1", "Other", 100, 1)).unwrap_err();
        assert_eq!(err, InventoryError::DuplicateCode("P1".to_string()));
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find("P1").unwrap().name(), "Widget");
    }

    #[test]
    fn codes_are_case_sensitive() {
        let mut catalog = catalog_with_widget();
        catalog.register(product("p1", "Lowercase", 100, 1)).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn find_unknown_code_is_not_found() {
        let catalog = Catalog::new();
        assert_eq!(catalog.find("nope").unwrap_err(), InventoryError::not_found("nope"));
    }

    #[test]
    fn search_by_name_ignores_case_and_keeps_order() {
        let mut catalog = Catalog::new();
        catalog.register(product("A", "Blue Widget", 100, 1)).unwrap();
        catalog.register(product("B", "Gadget", 100, 1)).unwrap();
        catalog.register(product("C", "widget mini", 100, 1)).unwrap();

        let hits = catalog.search_by_name("WIDGET");
        let codes: Vec<&str> = hits.clone().map(Product::code).collect();
        assert_eq!(codes, vec!["A", "C"]);
        // re-iterable
        assert_eq!(hits.count(), 2);
        assert_eq!(catalog.search_by_name("zzz").count(), 0);
    }

    #[test]
    fn receive_then_issue_restores_stock_with_two_entries() {
        let mut catalog = catalog_with_widget();
        catalog.receive_stock_at("P1", 7, at(1)).unwrap();
        let p = catalog.issue_stock_at("P1", 7, at(2)).unwrap();
        assert_eq!(p.stock_quantity(), 20);

        let kinds: Vec<MovementKind> = catalog.ledger().iter().map(Movement::kind).collect();
        assert_eq!(kinds, vec![MovementKind::Inbound, MovementKind::Outbound]);
        assert_eq!(catalog.ledger()[0].occurred_at(), at(1));
    }

    #[test]
    fn non_positive_quantities_are_rejected_without_side_effects() {
        let mut catalog = catalog_with_widget();
        for qty in [0, -3] {
            assert_eq!(
                catalog.receive_stock("P1", qty).unwrap_err(),
                InventoryError::InvalidQuantity(qty)
            );
            assert_eq!(
                catalog.issue_stock("P1", qty).unwrap_err(),
                InventoryError::InvalidQuantity(qty)
            );
        }
        assert!(catalog.ledger().is_empty());
        assert_eq!(catalog.find("P1").unwrap().stock_quantity(), 20);
    }

    #[test]
    fn receive_past_max_stock_is_rejected_without_side_effects() {
        let mut catalog = Catalog::new();
        catalog
            .register(Product::new("P1", "Bulk", Decimal::ONE, i64::MAX, 5).unwrap())
            .unwrap();
        catalog.receive_stock_at("P1", i64::MAX, at(1)).unwrap();
        let p = catalog.receive_stock_at("P1", 1, at(2)).unwrap();
        assert_eq!(p.stock_quantity(), u64::MAX);

        let err = catalog.receive_stock_at("P1", 1, at(3)).unwrap_err();
        assert_eq!(
            err,
            InventoryError::StockOverflow {
                code: "P1".to_string(),
                available: u64::MAX,
                requested: 1,
            }
        );
        assert_eq!(catalog.find("P1").unwrap().stock_quantity(), u64::MAX);
        assert_eq!(catalog.ledger().len(), 2);

        // stock still equals the initial quantity plus the ledger
        let received: u128 = catalog.ledger().iter().map(|m| u128::from(m.quantity())).sum();
        assert_eq!(i64::MAX as u128 + received, u128::from(u64::MAX));
    }

    #[test]
    fn stock_operations_on_unknown_code_fail() {
        let mut catalog = Catalog::new();
        assert!(matches!(catalog.receive_stock("X", 1), Err(InventoryError::NotFound(_))));
        assert!(matches!(catalog.issue_stock("X", 1), Err(InventoryError::NotFound(_))));
        assert!(catalog.ledger().is_empty());
    }

    #[test]
    fn widget_scenario() {
        let mut catalog = Catalog::new();
        catalog
            .register(Product::new("P1", "Widget", Decimal::new(1000, 2), 20, 5).unwrap())
            .unwrap();

        let p = catalog.issue_stock_at("P1", 16, at(0)).unwrap();
        assert_eq!(p.stock_quantity(), 4);
        assert!(p.is_low_stock());
        assert_eq!(p.deficit(), 1);

        let err = catalog.issue_stock_at("P1", 10, at(1)).unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                code: "P1".to_string(),
                available: 4,
                requested: 10,
            }
        );
        assert_eq!(catalog.find("P1").unwrap().stock_quantity(), 4);
        assert_eq!(catalog.ledger().len(), 1);
    }

    #[test]
    fn set_price_validates_and_propagates() {
        let mut catalog = catalog_with_widget();
        let p = catalog.set_price("P1", Decimal::new(1250, 2)).unwrap();
        assert_eq!(p.unit_price().to_string(), "12.50");

        let err = catalog.set_price("P1", Decimal::NEGATIVE_ONE).unwrap_err();
        assert!(matches!(
            err,
            InventoryError::Validation(ValidationError::NegativeValue { field: "unit_price", .. })
        ));
        assert_eq!(catalog.find("P1").unwrap().unit_price().to_string(), "12.50");
        assert!(matches!(catalog.set_price("X", Decimal::ONE), Err(InventoryError::NotFound(_))));
    }

    #[test]
    fn rename_and_threshold_setters_validate() {
        let mut catalog = catalog_with_widget();
        assert_eq!(catalog.rename("P1", "Sprocket").unwrap().name(), "Sprocket");
        assert!(catalog.rename("P1", " ").is_err());
        assert_eq!(catalog.set_reorder_threshold("P1", 25).unwrap().reorder_threshold(), 25);
        assert!(catalog.find("P1").unwrap().is_low_stock());
        assert!(catalog.set_reorder_threshold("P1", -1).is_err());
    }

    #[test]
    fn activation_is_idempotent_and_keeps_product_addressable() {
        let mut catalog = catalog_with_widget();
        catalog.register(product("P2", "Gadget", 500, 3)).unwrap();

        catalog.deactivate("P1").unwrap();
        catalog.deactivate("P1").unwrap();
        assert!(!catalog.find("P1").unwrap().is_active());
        let active: Vec<&str> = catalog.active_products().map(Product::code).collect();
        assert_eq!(active, vec!["P2"]);

        catalog.activate("P1").unwrap();
        catalog.activate("P1").unwrap();
        assert_eq!(catalog.active_products().count(), 2);
    }

    #[test]
    fn movements_are_most_recent_first_and_limited() {
        let mut catalog = catalog_with_widget();
        for minute in 1..=5 {
            catalog.receive_stock_at("P1", i64::from(minute), at(minute)).unwrap();
        }

        let quantities: Vec<u64> = catalog.movements(3).map(Movement::quantity).collect();
        assert_eq!(quantities, vec![5, 4, 3]);
        assert_eq!(catalog.movements(50).count(), 5);
    }

    #[test]
    fn deactivated_products_keep_their_history() {
        let mut catalog = catalog_with_widget();
        catalog.issue_stock_at("P1", 2, at(1)).unwrap();
        catalog.deactivate("P1").unwrap();
        assert_eq!(catalog.movements(10).next().unwrap().product_code(), "P1");
    }

    #[test]
    fn overwrite_replaces_mutable_fields_without_ledger_entry() {
        let mut catalog = catalog_with_widget();
        let incoming = Product::new("P1", "Widget v2", Decimal::new(99, 0), 3, 1)
            .unwrap()
            .with_active(false);
        let p = catalog.overwrite(incoming).unwrap();
        assert_eq!(p.name(), "Widget v2");
        assert_eq!(p.stock_quantity(), 3);
        assert_eq!(p.reorder_threshold(), 1);
        assert!(!p.is_active());
        assert!(catalog.ledger().is_empty());

        let unknown = product("ZZ", "Nope", 1, 1);
        assert!(matches!(catalog.overwrite(unknown), Err(InventoryError::NotFound(_))));
    }

    #[test]
    fn clear_products_keeps_ledger() {
        let mut catalog = catalog_with_widget();
        catalog.receive_stock_at("P1", 1, at(1)).unwrap();
        catalog.clear_products();
        assert!(catalog.is_empty());
        assert!(!catalog.contains("P1"));
        assert_eq!(catalog.ledger().len(), 1);

        // the code is free again after a clear
        catalog.register(product("P1", "Fresh", 100, 0)).unwrap();
        assert_eq!(catalog.find("P1").unwrap().name(), "Fresh");
    }

    #[test]
    fn record_movement_requires_known_product_and_keeps_stock() {
        let mut catalog = catalog_with_widget();
        let known = Movement::new("P1", MovementKind::Inbound, 4, at(9)).unwrap();
        catalog.record_movement(known).unwrap();
        assert_eq!(catalog.ledger().len(), 1);
        assert_eq!(catalog.find("P1").unwrap().stock_quantity(), 20);

        let orphan = Movement::new("X", MovementKind::Inbound, 4, at(9)).unwrap();
        assert!(matches!(catalog.record_movement(orphan), Err(InventoryError::NotFound(_))));
        assert_eq!(catalog.ledger().len(), 1);
    }

    #[test]
    fn snapshot_borrows_current_state() {
        let mut catalog = catalog_with_widget();
        catalog.receive_stock_at("P1", 2, at(3)).unwrap();
        let snapshot = catalog.snapshot_at(at(4));
        assert_eq!(snapshot.products().len(), 1);
        assert_eq!(snapshot.ledger().len(), 1);
        assert_eq!(snapshot.taken_at(), at(4));
        assert_eq!(snapshot.recent_movements(1).count(), 1);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: receive(q) then issue(q) is a no-op on stock and adds two entries.
            #[test]
            fn receive_then_issue_round_trips(
                initial in 0i64..10_000,
                qty in 1i64..10_000,
            ) {
                let mut catalog = Catalog::new();
                catalog.register(Product::new("P", "Thing", Decimal::ONE, initial, 5).unwrap()).unwrap();

                catalog.receive_stock("P", qty).unwrap();
                let after = catalog.issue_stock("P", qty).unwrap().stock_quantity();

                prop_assert_eq!(after, initial as u64);
                prop_assert_eq!(catalog.ledger().len(), 2);
            }

            /// Property: over-issuing fails and changes nothing.
            #[test]
            fn over_issue_never_goes_negative(
                initial in 0i64..1_000,
                extra in 1i64..1_000,
            ) {
                let mut catalog = Catalog::new();
                catalog.register(Product::new("P", "Thing", Decimal::ONE, initial, 5).unwrap()).unwrap();

                let result = catalog.issue_stock("P", initial + extra);
                let is_insufficient = matches!(result, Err(InventoryError::InsufficientStock { .. }));
                prop_assert!(is_insufficient);
                prop_assert_eq!(catalog.find("P").unwrap().stock_quantity(), initial as u64);
                prop_assert!(catalog.ledger().is_empty());
            }

            /// Property: stock equals initial + inbound - outbound over any sequence.
            #[test]
            fn stock_is_conserved_by_ledger(
                ops in proptest::collection::vec((any::<bool>(), 1i64..50), 0..40),
            ) {
                let mut catalog = Catalog::new();
                catalog.register(Product::new("P", "Thing", Decimal::ONE, 10, 5).unwrap()).unwrap();

                for (inbound, qty) in ops {
                    let _ = if inbound {
                        catalog.receive_stock("P", qty).map(|_| ())
                    } else {
                        catalog.issue_stock("P", qty).map(|_| ())
                    };
                }

                let net: i64 = catalog
                    .ledger()
                    .iter()
                    .map(|m| match m.kind() {
                        MovementKind::Inbound => m.quantity() as i64,
                        MovementKind::Outbound => -(m.quantity() as i64),
                    })
                    .sum();
                prop_assert_eq!(catalog.find("P").unwrap().stock_quantity() as i64, 10 + net);
            }
        }
    }
}
