//! Custom actions for the Product catalog.
//!
//! These are handled by [`LedgerEntity::handle_action`](ledger_framework::LedgerEntity::handle_action)
//! on [`Product`](crate::model::Product).

/// Custom actions for Product records.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductAction {
    /// Removes stock.
    ///
    /// # Arguments
    /// * `i64` - The quantity to remove
    ///
    /// # Errors
    /// Fails unless stock strictly exceeds the requested amount. A failed depletion is not
    /// persisted.
    Deplete(i64),
}
