use stockledger_inventory::Snapshot;

use crate::page::{Page, TIMESTAMP_FORMAT};
use crate::report::ReportGenerator;

/// Ledger entries shown when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// The last `limit` ledger entries, most recent first.
///
/// Entries show the product code as recorded; names are not looked up, since
/// the product may have been renamed or deactivated since.
#[derive(Debug, Clone, Copy)]
pub struct MovementHistory {
    limit: usize,
}

impl MovementHistory {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for MovementHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl ReportGenerator for MovementHistory {
    fn title(&self) -> &'static str {
        "MOVEMENT HISTORY"
    }

    fn generate(&self, snapshot: &Snapshot<'_>) -> String {
        let total = snapshot.ledger().len();

        let mut page = Page::new(self.title(), snapshot.taken_at());
        page.line(format!(
            "Showing last {} of {total} movements",
            self.limit.min(total)
        ));
        page.rule();

        if total == 0 {
            page.line("No movements recorded");
        }
        for movement in snapshot.recent_movements(self.limit) {
            page.line(format!(
                "[{}] {:<8} {:>6} units | {}",
                movement.occurred_at().format(TIMESTAMP_FORMAT),
                movement.kind().label(),
                movement.quantity(),
                movement.product_code(),
            ));
        }

        page.finish()
    }
}
