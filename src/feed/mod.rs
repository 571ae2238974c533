//! Sources of decoded events for the transformation engine.

pub mod jsonl;

use thiserror::Error;

pub use jsonl::stream_events;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed event on line {line}: {source}")]
    Parse {
        line: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("Event channel closed")]
    ChannelClosed,
}
