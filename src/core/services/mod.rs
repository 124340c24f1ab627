pub mod search_service;
pub mod summary_service;

pub use search_service::{Search, SearchMode};
pub use summary_service::{
    CategorySummaryItem, Statistics, StatisticsMode, StatisticsReport, TimeSummary,
};
