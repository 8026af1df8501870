use stockledger_inventory::{Product, Snapshot};

use crate::page::Page;
use crate::report::ReportGenerator;

/// Active products at or below their reorder threshold.
///
/// The deficit is `max(0, threshold - stock)`, so a product sitting exactly
/// on its threshold is listed with a deficit of zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowStock;

impl ReportGenerator for LowStock {
    fn title(&self) -> &'static str {
        "LOW STOCK REPORT"
    }

    fn generate(&self, snapshot: &Snapshot<'_>) -> String {
        let low: Vec<&Product> = snapshot
            .active_products()
            .filter(|p| p.is_low_stock())
            .collect();

        let mut page = Page::new(self.title(), snapshot.taken_at());
        page.line(format!("Products with low stock: {}", low.len()));
        page.rule();

        if snapshot.active_products().next().is_none() {
            page.line("No products registered");
        } else if low.is_empty() {
            page.line("All products have adequate stock");
        } else {
            for product in low {
                page.line(format!(
                    "{} ({}) | Stock: {} | Threshold: {} | Deficit: {}",
                    product.name(),
                    product.code(),
                    product.stock_quantity(),
                    product.reorder_threshold(),
                    product.deficit(),
                ));
            }
        }

        page.finish()
    }
}
