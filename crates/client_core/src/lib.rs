//! Client-side pagination and aggregation for comment sentiment analysis.
//!
//! [`AnalysisCoordinator`] issues page-scoped requests through an
//! [`AnalysisService`], keeps the page, corpus labels and totals of the last
//! successful response as one [`AnalysisSnapshot`], and derives the corpus-wide
//! [`SentimentTally`] from it.

pub mod coordinator;
pub mod error;
pub mod pagination;
pub mod service;
pub mod tally;

pub use coordinator::{
    AnalysisCoordinator, AnalysisSnapshot, CoordinatorEvent, FetchOutcome, Phase, RequestTag,
    SkipReason,
};
pub use error::{FetchError, ServiceSetupError};
pub use pagination::PaginationState;
pub use service::{AnalysisService, HttpAnalysisService};
pub use tally::{tally, ChartSlice, SentimentTally};
