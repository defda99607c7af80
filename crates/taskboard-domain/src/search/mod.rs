//! Task title search and highlighting.
//!
//! Matching is a case-insensitive literal substring search. Highlighting is a
//! display-time transform and never touches stored data.

use serde::Serialize;
use std::ops::Range;

/// A run of title text, flagged when it matched the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub matched: bool,
}

impl Segment {
    fn plain(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: false,
        }
    }

    fn hit(text: &str) -> Self {
        Self {
            text: text.to_string(),
            matched: true,
        }
    }
}

/// Search task titles by a query (case-insensitive).
pub struct TitleSearcher {
    needle: Vec<char>,
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

impl TitleSearcher {
    /// A query that is blank after trimming matches nothing and highlights nothing.
    pub fn new(query: impl AsRef<str>) -> Self {
        let query = query.as_ref();
        let needle = if query.trim().is_empty() {
            Vec::new()
        } else {
            query.chars().map(fold).collect()
        };
        Self { needle }
    }

    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, text: &str) -> bool {
        !self.find_spans(text).is_empty()
    }

    /// Split `text` into matched and unmatched runs. Concatenating the runs
    /// always reproduces `text`.
    pub fn highlight(&self, text: &str) -> Vec<Segment> {
        let spans = self.find_spans(text);
        if spans.is_empty() {
            return vec![Segment::plain(text)];
        }

        let mut segments = Vec::with_capacity(spans.len() * 2 + 1);
        let mut cursor = 0;
        for span in spans {
            if span.start > cursor {
                segments.push(Segment::plain(&text[cursor..span.start]));
            }
            segments.push(Segment::hit(&text[span.clone()]));
            cursor = span.end;
        }
        if cursor < text.len() {
            segments.push(Segment::plain(&text[cursor..]));
        }
        segments
    }

    /// Non-overlapping byte ranges of every match, left to right.
    fn find_spans(&self, text: &str) -> Vec<Range<usize>> {
        if self.needle.is_empty() {
            return Vec::new();
        }

        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let n = self.needle.len();
        let mut spans = Vec::new();
        let mut i = 0;
        while i + n <= chars.len() {
            let hit = chars[i..i + n]
                .iter()
                .zip(&self.needle)
                .all(|((_, c), q)| fold(*c) == *q);
            if hit {
                let start = chars[i].0;
                let end = chars.get(i + n).map(|(b, _)| *b).unwrap_or(text.len());
                spans.push(start..end);
                i += n;
            } else {
                i += 1;
            }
        }
        spans
    }
}

pub fn highlight(text: &str, query: &str) -> Vec<Segment> {
    TitleSearcher::new(query).highlight(text)
}

pub fn matches(text: &str, query: &str) -> bool {
    TitleSearcher::new(query).matches(text)
}

/// Join segments back into one string, wrapping matched runs in `open`/`close`.
pub fn render(segments: &[Segment], open: &str, close: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.matched {
            out.push_str(open);
            out.push_str(&segment.text);
            out.push_str(close);
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}
