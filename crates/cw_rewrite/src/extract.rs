use cw_core::RewrittenDraft;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

lazy_static! {
    static ref TITLE_RE: Regex = Regex::new(r#""title"\s*:\s*"((?:\\.|[^"\\])*)""#).unwrap();
    static ref PARAGRAPH_RE: Regex = Regex::new(r"(?s)<p\b[^>]*>.*?</p>").unwrap();
}

/// Minimum number of paragraph spans the salvage tier accepts.
const SALVAGE_MIN_PARAGRAPHS: usize = 5;

#[derive(Deserialize)]
struct DraftWire {
    title: String,
    content: String,
}

/// One tier of the response-parsing ladder. Tried in `ladder()` order, each
/// tier more permissive than the last, because the model is free to wrap its
/// JSON in prose, truncate it, or leave raw control characters inside string
/// values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    StrictJson,
    ManualExtraction,
    ParagraphSalvage,
}

impl ExtractionStrategy {
    pub fn ladder() -> Vec<ExtractionStrategy> {
        vec![
            ExtractionStrategy::StrictJson,
            ExtractionStrategy::ManualExtraction,
            ExtractionStrategy::ParagraphSalvage,
        ]
    }

    /// Attempt to pull a `{title, content}` pair out of a raw model
    /// response. `None` means this tier could not produce content longer
    /// than `min_content_len`.
    pub fn try_extract(
        &self,
        raw: &str,
        fallback_title: &str,
        min_content_len: usize,
    ) -> Option<RewrittenDraft> {
        match self {
            ExtractionStrategy::StrictJson => strict_json(raw, min_content_len),
            ExtractionStrategy::ManualExtraction => {
                manual_extraction(raw, fallback_title, min_content_len)
            }
            ExtractionStrategy::ParagraphSalvage => {
                paragraph_salvage(raw, fallback_title, min_content_len)
            }
        }
    }
}

/// Escape raw control characters that appear inside JSON string literals so
/// the document parses. Outside string literals raw whitespace is already
/// legal JSON, so the scan tracks quoting state instead of doing a blind
/// global replace.
pub fn clean_control_chars(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in raw.chars() {
        if !in_string {
            out.push(c);
            if c == '"' {
                in_string = true;
            }
            continue;
        }
        if escaped {
            out.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                out.push(c);
                escaped = true;
            }
            '"' => {
                out.push(c);
                in_string = false;
            }
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => {}
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }
    out
}

fn strict_json(raw: &str, min_content_len: usize) -> Option<RewrittenDraft> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    let cleaned = clean_control_chars(&raw[start..=end]);
    let wire: DraftWire = serde_json::from_str(&cleaned).ok()?;
    if wire.title.trim().is_empty() || wire.content.len() <= min_content_len {
        return None;
    }
    Some(RewrittenDraft {
        title: wire.title,
        content: wire.content,
    })
}

fn manual_extraction(
    raw: &str,
    fallback_title: &str,
    min_content_len: usize,
) -> Option<RewrittenDraft> {
    let key = raw.find("\"content\"")?;
    let after_key = &raw[key + "\"content\"".len()..];
    let colon = after_key.find(':')?;
    let after_colon = &after_key[colon + 1..];
    let open = after_colon.find('"')?;
    let body = &after_colon[open + 1..];

    // End-of-value markers in decreasing order of confidence; as a last
    // resort assume the value runs through the final closing paragraph tag.
    let end = body
        .find("\"}")
        .or_else(|| body.find("\" }"))
        .or_else(|| body.find("\"\n}"))
        .or_else(|| body.rfind("</p>").map(|i| i + "</p>".len()))?;

    let content = unescape(&body[..end]);
    if content.len() <= min_content_len {
        return None;
    }
    let title = extract_title(raw).unwrap_or_else(|| fallback_title.to_string());
    Some(RewrittenDraft { title, content })
}

fn paragraph_salvage(
    raw: &str,
    fallback_title: &str,
    min_content_len: usize,
) -> Option<RewrittenDraft> {
    let paragraphs: Vec<&str> = PARAGRAPH_RE.find_iter(raw).map(|m| m.as_str()).collect();
    if paragraphs.len() < SALVAGE_MIN_PARAGRAPHS {
        return None;
    }
    let content = paragraphs.join("\n");
    if content.len() <= min_content_len {
        return None;
    }
    let title = extract_title(raw).unwrap_or_else(|| fallback_title.to_string());
    Some(RewrittenDraft { title, content })
}

fn extract_title(raw: &str) -> Option<String> {
    TITLE_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| unescape(m.as_str()))
        .filter(|title| !title.trim().is_empty())
}

fn unescape(value: &str) -> String {
    value
        .replace("\\\"", "\"")
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\\\", "\\")
}
