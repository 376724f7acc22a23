//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Shared utilities (open_db) and init
//! - `import` - CSV import
//! - `transactions` - Add/list transactions and list categories
//! - `analyze` - Spending analysis report
//! - `ai` - Text-generation backend status

pub mod ai;
pub mod analyze;
pub mod core;
pub mod import;
pub mod transactions;

// Re-export command functions for main.rs
pub use ai::*;
pub use analyze::*;
pub use core::*;
pub use import::*;
pub use transactions::*;

/// Truncate a string to a maximum number of characters, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
