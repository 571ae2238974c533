//! Replays decoded events from a JSON-lines file, one event per line.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc::Sender;

use super::FeedError;
use crate::transformations::DecodedEvent;

/// Stream every event in `path` into `tx`, in file order.
///
/// Returns the number of events sent. Stops at the first malformed line.
pub async fn stream_events(path: &Path, tx: Sender<DecodedEvent>) -> Result<u64, FeedError> {
    let file = File::open(path).await?;
    tracing::info!("Streaming decoded events from {}", path.display());
    let sent = stream_from(file, tx).await?;
    tracing::info!("Finished streaming {} events from {}", sent, path.display());
    Ok(sent)
}

async fn stream_from<R: AsyncRead + Unpin>(
    reader: R,
    tx: Sender<DecodedEvent>,
) -> Result<u64, FeedError> {
    let mut lines = BufReader::new(reader).lines();
    let mut line_number = 0u64;
    let mut sent = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_number += 1;
        if line.trim().is_empty() {
            continue;
        }

        let event: DecodedEvent = serde_json::from_str(&line).map_err(|source| FeedError::Parse {
            line: line_number,
            source,
        })?;
        tx.send(event).await.map_err(|_| FeedError::ChannelClosed)?;
        sent += 1;
    }

    Ok(sent)
}
