//! Message Chunker
//!
//! Packs report blocks greedily into messages no longer than a limit,
//! measured in characters. A block is only ever split when it alone exceeds
//! the limit; its tail then starts the next message.

use crate::report::FormattedReport;

/// Limit used for outgoing reports, below Telegram's 4096-character ceiling
pub const DEFAULT_CHUNK_LIMIT: usize = 4000;

/// Hard ceiling of a Telegram photo caption
pub const CAPTION_LIMIT: usize = 1024;

pub fn chunk(report: &FormattedReport, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for block in report.blocks() {
        let len = block.chars().count();

        if current_len + len <= limit {
            current.push_str(block);
            current_len += len;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if len <= limit {
            current.push_str(block);
            current_len = len;
            continue;
        }

        let mut rest = block.as_str();
        while rest.chars().count() > limit {
            let (head, tail) = split_at_char(rest, limit);
            chunks.push(head.to_string());
            rest = tail;
        }
        current.push_str(rest);
        current_len = rest.chars().count();
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Split after `n` characters, never inside a UTF-8 sequence
fn split_at_char(s: &str, n: usize) -> (&str, &str) {
    let idx = s.char_indices().nth(n).map_or(s.len(), |(i, _)| i);
    s.split_at(idx)
}

/// Whether `text` fits in a single message of `limit` characters
pub fn fits(text: &str, limit: usize) -> bool {
    text.chars().count() <= limit
}
