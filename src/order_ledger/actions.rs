//! Custom actions for the Order ledger.

/// Custom actions for Order records.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderAction {
    /// Marks the order as confirmed once its stock has been depleted. Returns the new state.
    Confirm,
}
