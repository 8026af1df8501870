use chrono::{DateTime, Utc};

use crate::movement::Movement;
use crate::product::Product;

/// Read-only view of a catalog at a point in time.
///
/// Reports render from a snapshot so their output depends only on the
/// borrowed state and `taken_at`.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    products: &'a [Product],
    ledger: &'a [Movement],
    taken_at: DateTime<Utc>,
}

impl<'a> Snapshot<'a> {
    pub fn new(products: &'a [Product], ledger: &'a [Movement], taken_at: DateTime<Utc>) -> Self {
        Self {
            products,
            ledger,
            taken_at,
        }
    }

    /// Every product, including inactive ones, in insertion order.
    pub fn products(&self) -> &'a [Product] {
        self.products
    }

    pub fn active_products(&self) -> impl Iterator<Item = &'a Product> + Clone + use<'a> {
        self.products.iter().filter(|p| p.is_active())
    }

    /// Full ledger, oldest first.
    pub fn ledger(&self) -> &'a [Movement] {
        self.ledger
    }

    /// The last `limit` ledger entries, most recent first.
    pub fn recent_movements(&self, limit: usize) -> impl Iterator<Item = &'a Movement> + use<'a> {
        self.ledger.iter().rev().take(limit)
    }

    pub fn taken_at(&self) -> DateTime<Utc> {
        self.taken_at
    }
}
