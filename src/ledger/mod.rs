//! Ledger domain models and the aggregate root that owns them.

pub mod category;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod record;

pub use category::{Category, CategoryMerge, CategoryMergePolicy, CUSTOM_PLACEHOLDER_NAME};
pub use ledger::{Ledger, LedgerProfile, LedgerSnapshot, LoadSummary};
pub use record::{parse_amount_input, Record, RecordType};
