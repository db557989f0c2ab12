//! Line codec for the stdio wire protocol.
//!
//! Message format:
//! ```text
//! {"jsonrpc":"2.0","id":1,"method":"tools/list"}\n
//! ```
//! One UTF-8 JSON value per line. Blank lines are skipped; a trailing `\r`
//! is tolerated.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt};

/// Read one message line from the stream.
///
/// Returns `None` on clean EOF. `max_line_bytes` caps the accepted line size
/// (excluding the terminator).
pub async fn read_message<R: AsyncBufRead + Unpin>(
    reader: &mut R,
    max_line_bytes: usize,
) -> std::io::Result<Option<Vec<u8>>> {
    loop {
        let mut line = Vec::new();
        let limit = max_line_bytes as u64 + 1;
        let n = (&mut *reader).take(limit).read_until(b'\n', &mut line).await?;
        if n == 0 {
            return Ok(None);
        }

        let terminated = line.last() == Some(&b'\n');
        if terminated {
            line.pop();
        } else if line.len() > max_line_bytes {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Message too large: more than {} bytes", max_line_bytes),
            ));
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }

        if line.iter().all(u8::is_ascii_whitespace) {
            if terminated {
                continue;
            }
            return Ok(None);
        }
        return Ok(Some(line));
    }
}

/// Write one message line to the stream.
pub async fn write_message<W: AsyncWriteExt + Unpin>(
    writer: &mut W,
    message: &serde_json::Value,
) -> std::io::Result<()> {
    let mut payload = serde_json::to_vec(message)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    payload.push(b'\n');
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::io::BufReader;

    #[tokio::test]
    async fn test_reads_lines_and_skips_blanks() {
        let input: &[u8] = b"{\"a\":1}\r\n\n  \n{\"b\":2}";
        let mut reader = BufReader::new(input);
        assert_eq!(read_message(&mut reader, 64).await.unwrap().unwrap(), b"{\"a\":1}");
        assert_eq!(read_message(&mut reader, 64).await.unwrap().unwrap(), b"{\"b\":2}");
        assert!(read_message(&mut reader, 64).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_oversized_line() {
        let input: &[u8] = b"0123456789\n";
        let mut reader = BufReader::new(input);
        let err = read_message(&mut reader, 4).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn test_exact_limit_accepted() {
        let input: &[u8] = b"1234\n";
        let mut reader = BufReader::new(input);
        assert_eq!(read_message(&mut reader, 4).await.unwrap().unwrap(), b"1234");
    }

    #[tokio::test]
    async fn test_write_appends_newline() {
        let mut out = Vec::new();
        write_message(&mut out, &json!({"ok": true})).await.unwrap();
        assert_eq!(out, b"{\"ok\":true}\n");
    }
}
