//! Trading account DTOs

use serde::{Deserialize, Serialize};

/// Create-account form input.
///
/// `initial_balance` is kept as typed; parsing is part of the workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTradingAccountDto {
    /// Account label.
    pub name: String,
    /// Starting balance as typed by the user.
    pub initial_balance: String,
}
