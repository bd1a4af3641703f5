//! Code fence and code span tracking.
//!
//! Directive syntax inside fenced code blocks and inline code spans is
//! example text, so the renderer needs to know where those regions are.

use std::ops::Range;

/// An open code fence: marker character, run length, and the blockquote
/// depth it was opened at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
    quote_depth: usize,
}

/// Tracks fenced code block state during line-by-line processing.
///
/// Fences use three or more backticks or tildes, optionally inside
/// blockquotes. A fence closes on a line made of the same
/// character, at least as long as the opening run, at the same blockquote
/// depth. A line with fewer `>` markers leaves the blockquote and ends the
/// fence.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if the line opens or closes a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let (quote_depth, trimmed) = strip_blockquote(line);

        if let Some(fence) = self.open {
            if quote_depth >= fence.quote_depth {
                if quote_depth == fence.quote_depth && closes(trimmed, fence) {
                    self.open = None;
                    return true;
                }
                return false;
            }
            self.open = None;
        }

        self.open = opening_fence(trimmed, quote_depth);
        self.open.is_some()
    }
}

/// Strip leading whitespace and blockquote markers.
///
/// Returns the number of `>` markers and the remaining text.
fn strip_blockquote(line: &str) -> (usize, &str) {
    let mut depth = 0;
    let mut rest = line.trim_start();
    while let Some(inner) = rest.strip_prefix('>') {
        depth += 1;
        rest = inner.trim_start();
    }
    (depth, rest)
}

fn opening_fence(trimmed: &str, quote_depth: usize) -> Option<Fence> {
    let marker = trimmed.chars().next().filter(|&c| matches!(c, '`' | '~'))?;
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    if len < 3 {
        return None;
    }
    // Backtick fences may not carry backticks in their info string
    if marker == '`' && trimmed[len..].contains('`') {
        return None;
    }
    Some(Fence {
        marker,
        len,
        quote_depth,
    })
}

fn closes(trimmed: &str, fence: Fence) -> bool {
    let len = trimmed.chars().take_while(|&c| c == fence.marker).count();
    len >= fence.len && trimmed[len..].trim().is_empty()
}

/// Byte ranges of inline code spans in a single line.
///
/// A span opens with a run of backticks and closes with the next run of
/// exactly the same length. Unmatched runs are ordinary text.
pub(crate) fn code_spans(line: &str) -> Vec<Range<usize>> {
    let bytes = line.as_bytes();
    let mut spans = Vec::new();
    let mut pos = 0;

    while let Some(offset) = line[pos..].find('`') {
        let start = pos + offset;
        let run = backtick_run(bytes, start);
        let mut search = start + run;
        let mut closed = None;

        while let Some(offset) = line[search..].find('`') {
            let candidate = search + offset;
            let len = backtick_run(bytes, candidate);
            if len == run {
                closed = Some(candidate + len);
                break;
            }
            search = candidate + len;
        }

        match closed {
            Some(end) => {
                spans.push(start..end);
                pos = end;
            }
            None => pos = start + run,
        }
    }

    spans
}

fn backtick_run(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().take_while(|&&b| b == b'`').count()
}
