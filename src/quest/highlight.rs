//! Keyword highlighting for task text.

use regex::Regex;
use serde::Serialize;

use crate::plan::Keyword;

/// A run of task text, either plain or a recognised keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Segment {
    Plain { text: String },
    Keyword { text: String, explanation: String },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Plain { text } | Segment::Keyword { text, .. } => text,
        }
    }
}

/// Split `text` into plain and keyword segments.
///
/// Longer terms win over terms they contain. Concatenating the segment
/// texts yields `text` again.
pub fn highlight_keywords(text: &str, keywords: &[Keyword]) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }

    let plain = |s: &str| Segment::Plain {
        text: s.to_string(),
    };

    let mut terms: Vec<&str> = keywords
        .iter()
        .map(|k| k.term.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    terms.sort_by(|a, b| {
        b.chars()
            .count()
            .cmp(&a.chars().count())
            .then_with(|| a.cmp(b))
    });
    terms.dedup();

    if terms.is_empty() {
        return vec![plain(text)];
    }

    let pattern = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    let Ok(re) = Regex::new(&pattern) else {
        return vec![plain(text)];
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in re.find_iter(text) {
        if m.start() > last {
            segments.push(plain(&text[last..m.start()]));
        }
        let explanation = keywords
            .iter()
            .find(|k| k.term == m.as_str())
            .map(|k| k.explanation.clone())
            .unwrap_or_default();
        segments.push(Segment::Keyword {
            text: m.as_str().to_string(),
            explanation,
        });
        last = m.end();
    }
    if last < text.len() {
        segments.push(plain(&text[last..]));
    }

    segments
}
