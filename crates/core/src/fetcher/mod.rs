//! Fetcher module - external channel data capabilities.
//!
//! The sync engine consumes channel/video data through the traits defined
//! here; `HttpChannelDataFetcher` is the reqwest-backed implementation
//! against the upstream data API.

mod collector;
mod fetcher_model;
mod fetcher_traits;
mod http_fetcher;

// Re-export the public interface
pub use collector::DailyMetricsCollector;
pub use fetcher_model::{ChannelInfo, DailyMetricsSummary, FetchError, VideoInfo};
pub use fetcher_traits::{ChannelDataFetcher, MetricsCollector};
pub use http_fetcher::HttpChannelDataFetcher;
