//! Line-delimited JSON transport.
//!
//! Each input line is a [`ToolRequest`]; each produces exactly one output
//! line. Blank lines are skipped. A line that is not a valid request yields an
//! error payload and the loop keeps reading.

use serde_json::json;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use graphlens_store::GraphStore;

use crate::tools::{ToolRequest, ToolServer};

/// Serve requests from `reader` until EOF. Returns the number of requests answered.
pub async fn serve<S, R, W>(server: &ToolServer<S>, reader: R, mut writer: W) -> std::io::Result<usize>
where
    S: GraphStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut answered = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ToolRequest>(line) {
            Ok(request) => server.handle(&request.tool, request.arguments),
            Err(e) => {
                tracing::warn!(error = %e, "Malformed request line");
                json!({ "success": false, "error": format!("Invalid request: {e}") })
            }
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
        answered += 1;
    }

    tracing::debug!(answered, "Input closed");
    Ok(answered)
}
