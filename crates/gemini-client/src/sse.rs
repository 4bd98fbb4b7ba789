//! Incremental server-sent-events decoder
//!
//! Network chunks may split events, lines or UTF-8 sequences anywhere; the
//! decoder buffers bytes and yields each complete event's `data` payload.

#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk; returns the payloads of all events it completed
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend(chunk.iter().copied().filter(|b| *b != b'\r'));
        let mut events = Vec::new();
        while let Some(end) = find_boundary(&self.buffer) {
            let event: Vec<u8> = self.buffer.drain(..end + 2).collect();
            if let Some(data) = event_data(&event[..end]) {
                events.push(data);
            }
        }
        events
    }

    /// Flush a trailing event that was not terminated by a blank line
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        event_data(&rest)
    }
}

fn find_boundary(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\n\n")
}

fn event_data(event: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(event);
    let lines: Vec<&str> = text
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|data| data.strip_prefix(' ').unwrap_or(data))
        .collect();
    if lines.is_empty() {
        return None;
    }
    let data = lines.join("\n");
    (!data.trim().is_empty()).then_some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_split_across_chunks() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: {\"a\":").is_empty());
        let events = dec.push(b"1}\r\n\r\ndata: {\"b\":2}\n\n: keep-alive\n\n");
        assert_eq!(events, vec!["{\"a\":1}".to_string(), "{\"b\":2}".to_string()]);
        assert_eq!(dec.finish(), None);
    }

    #[test]
    fn test_multibyte_character_split() {
        let mut dec = SseDecoder::new();
        let bytes = "data: caf\u{e9}\n\n".as_bytes();
        let (head, tail) = bytes.split_at(10);
        assert!(dec.push(head).is_empty());
        assert_eq!(dec.push(tail), vec!["caf\u{e9}".to_string()]);
    }

    #[test]
    fn test_unterminated_tail() {
        let mut dec = SseDecoder::new();
        assert!(dec.push(b"data: last").is_empty());
        assert_eq!(dec.finish().as_deref(), Some("last"));
    }

    #[test]
    fn test_multi_line_data() {
        let mut dec = SseDecoder::new();
        assert_eq!(dec.push(b"event: x\ndata: one\ndata: two\n\n"), vec!["one\ntwo".to_string()]);
    }
}
