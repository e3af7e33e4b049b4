use flume::Sender;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open log source {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read log source {source_name} after {lines} lines: {source}")]
    Read {
        source_name: String,
        lines: u64,
        #[source]
        source: io::Error,
    },

    #[error("raw line queue closed after {lines} lines")]
    QueueClosed { lines: u64 },
}

/// Read the log file once from the start, handing every line to the raw-line queue.
pub async fn ingest_file(
    path: &Path,
    tx: Sender<String>,
    progress_every: u64,
) -> Result<u64, IngestError> {
    let file = File::open(path).await.map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    ingest_lines(
        BufReader::new(file),
        &path.display().to_string(),
        tx,
        progress_every,
    )
    .await
}

/// Forward each line of `reader`, waiting whenever the queue is full.
///
/// Lines are forwarded whether or not they parse. Invalid UTF-8 is replaced
/// rather than treated as a read failure.
pub async fn ingest_lines<R>(
    mut reader: R,
    source_name: &str,
    tx: Sender<String>,
    progress_every: u64,
) -> Result<u64, IngestError>
where
    R: AsyncBufRead + Unpin,
{
    let progress_every = progress_every.max(1);
    let mut lines: u64 = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|source| {
                warn!(source_name, lines, error = %source, "log source read failed");
                IngestError::Read {
                    source_name: source_name.to_string(),
                    lines,
                    source,
                }
            })?;

        if n == 0 {
            info!(source_name, lines, "log source read out");
            return Ok(lines);
        }

        let line = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\r', '\n'])
            .to_string();

        if tx.send_async(line).await.is_err() {
            return Err(IngestError::QueueClosed { lines });
        }
        lines += 1;

        if lines % progress_every == 0 {
            info!(source_name, lines, "read progress");
        }
    }
}
