use stockledger_core::Money;
use stockledger_inventory::{Product, Snapshot};

use crate::page::Page;
use crate::report::ReportGenerator;

/// Total stock value of active products, with a per-product breakdown.
///
/// Lines are ordered by value, highest first; equal values keep catalog
/// order. Totals are accumulated as decimals.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationReport;

impl ValuationReport {
    /// Active products paired with their stock value, highest value first.
    pub fn ranked<'a>(snapshot: &Snapshot<'a>) -> Vec<(&'a Product, Money)> {
        let mut ranked: Vec<(&Product, Money)> = snapshot
            .active_products()
            .map(|p| (p, p.stock_value()))
            .collect();
        // stable: ties stay in insertion order
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    pub fn total(snapshot: &Snapshot<'_>) -> Money {
        snapshot.active_products().map(Product::stock_value).sum()
    }
}

impl ReportGenerator for ValuationReport {
    fn title(&self) -> &'static str {
        "INVENTORY VALUATION REPORT"
    }

    fn generate(&self, snapshot: &Snapshot<'_>) -> String {
        let ranked = Self::ranked(snapshot);
        let total: Money = ranked.iter().map(|(_, value)| *value).sum();

        let mut page = Page::new(self.title(), snapshot.taken_at());
        page.line(format!("Active products: {}", ranked.len()));
        page.line(format!("Total inventory value: {total}"));
        page.rule();

        if ranked.is_empty() {
            page.line("No products registered");
        } else {
            page.line("Detail by product:");
            for (product, value) in ranked {
                page.line(format!(
                    "  {} ({}): {} units x {} = {value}",
                    product.name(),
                    product.code(),
                    product.stock_quantity(),
                    product.unit_price(),
                ));
            }
        }

        page.finish()
    }
}
