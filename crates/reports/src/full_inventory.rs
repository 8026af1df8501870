use stockledger_inventory::Snapshot;

use crate::page::Page;
use crate::report::ReportGenerator;

/// Every active product with price, stock and a low-stock marker.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullInventory;

impl ReportGenerator for FullInventory {
    fn title(&self) -> &'static str {
        "FULL INVENTORY REPORT"
    }

    fn generate(&self, snapshot: &Snapshot<'_>) -> String {
        let active = snapshot.active_products();

        let mut page = Page::new(self.title(), snapshot.taken_at());
        page.line(format!("Total products: {}", active.clone().count()));
        page.rule();

        let mut any = false;
        for product in active {
            any = true;
            let marker = if product.is_low_stock() { " | LOW STOCK" } else { "" };
            page.line(format!(
                "{} | {} | Price: {} | Stock: {}{marker}",
                product.code(),
                product.name(),
                product.unit_price(),
                product.stock_quantity(),
            ));
        }
        if !any {
            page.line("No products registered");
        }

        page.finish()
    }
}
