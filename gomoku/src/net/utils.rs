use serde::{Serialize, de::DeserializeOwned};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::errors::{CodecError, Result};

/// Maximum allowed line size (4KB). Protocol messages are tiny; anything
/// larger is a misbehaving peer.
pub const MAX_MESSAGE_SIZE: usize = 4 * 1024;

/// Read one newline-terminated JSON value.
///
/// Returns `Ok(None)` on a clean end of stream before any byte of a new
/// message. A final line without a trailing newline is still decoded.
pub async fn read_line_json<T: DeserializeOwned, R: AsyncBufRead + Unpin>(
    reader: &mut R,
) -> Result<Option<T>> {
    let mut line = String::new();
    // Read one byte past the limit so an oversized line is detectable
    // without buffering all of it.
    let limit = (MAX_MESSAGE_SIZE + 1) as u64;
    let read = (&mut *reader).take(limit).read_line(&mut line).await?;
    if read == 0 {
        return Ok(None);
    }
    if line.len() > MAX_MESSAGE_SIZE && !line.ends_with('\n') {
        return Err(CodecError::MessageTooLarge {
            max: MAX_MESSAGE_SIZE,
        });
    }

    let trimmed = line.trim_end_matches(['\n', '\r']);
    Ok(Some(serde_json::from_str(trimmed)?))
}

/// Write `value` as one JSON line and flush it.
pub async fn write_line_json<T: Serialize, W: AsyncWrite + Unpin>(writer: &mut W, value: &T) -> Result<()> {
    let mut buf = serde_json::to_vec(value)?;
    if buf.len() > MAX_MESSAGE_SIZE {
        return Err(CodecError::MessageTooLarge {
            max: MAX_MESSAGE_SIZE,
        });
    }

    // Write the message and its terminator in one chunk so the reader never
    // sees a partial line followed by a stall.
    buf.push(b'\n');
    writer.write_all(&buf).await?;
    writer.flush().await?;
    Ok(())
}
