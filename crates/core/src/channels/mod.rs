//! Channels module - local channel/video records refreshed by the sync engine.

mod channel_model;
mod channel_traits;

// Re-export the public interface
pub use channel_model::{Channel, UpsertOutcome, Video};
pub use channel_traits::{ChannelRepositoryTrait, VideoRepositoryTrait};
