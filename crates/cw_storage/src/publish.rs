use chrono::{DateTime, Utc};
use cw_core::{Candidate, NewsArticle, RewrittenDraft};
use lazy_static::lazy_static;
use regex::Regex;

const SLUG_MAX_LEN: usize = 100;
const EXCERPT_MAX_LEN: usize = 250;

lazy_static! {
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Build the persisted row for one rewritten candidate. The slug gets a
/// base-36 timestamp suffix so uniqueness needs no store round trip.
pub fn compose_article(
    draft: RewrittenDraft,
    candidate: &Candidate,
    now: DateTime<Utc>,
) -> NewsArticle {
    let slug = unique_slug(&draft.title, now.timestamp_millis() as u64);
    let excerpt = excerpt(&draft.content);
    NewsArticle {
        title: draft.title,
        slug,
        content: draft.content,
        excerpt,
        image_url: candidate.image_url.clone(),
        source_name: candidate.source_name.clone(),
        source_url: candidate.url.clone(),
        status: "published".to_string(),
        ai_generated: true,
        published_at: candidate.published_at.unwrap_or(now),
    }
}

pub fn unique_slug(title: &str, timestamp_millis: u64) -> String {
    format!("{}-{}", slugify(title), to_base36(timestamp_millis))
}

/// Lowercased, hyphen-separated, ASCII-alphanumeric slug with no leading,
/// trailing, or consecutive hyphens, truncated to 100 chars.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;
    for c in title.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c);
            pending_hyphen = false;
        } else {
            pending_hyphen = true;
        }
    }
    slug.truncate(SLUG_MAX_LEN);
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("article");
    }
    slug
}

/// Plain-text preview of the content: tags stripped, whitespace collapsed,
/// truncated to 250 chars.
pub fn excerpt(content: &str) -> String {
    let stripped = TAG_RE.replace_all(content, " ");
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(EXCERPT_MAX_LEN).collect()
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8(out).expect("base36 digits are ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use cw_core::Provider;

    fn candidate() -> Candidate {
        Candidate {
            title: "Dune: Part Three!!".to_string(),
            description: "Summary.".to_string(),
            url: "https://example.com/dune-3".to_string(),
            image_url: Some("https://example.com/dune.jpg".to_string()),
            source_name: "Example Wire".to_string(),
            published_at: None,
            provider: Provider::NewsApi,
        }
    }

    #[test]
    fn slug_strips_punctuation_and_appends_timestamp() {
        let slug = unique_slug("Dune: Part Three!!", 12345);
        let suffix = to_base36(12345);
        assert_eq!(slug, format!("dune-part-three-{}", suffix));
        assert!(slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.contains("--"));
        assert!(!slug.starts_with('-'));
    }

    #[test]
    fn slug_truncates_before_suffix() {
        let title = "word ".repeat(40);
        let slug = slugify(&title);
        assert!(slug.len() <= 100);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn base36_round_numbers() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn excerpt_strips_tags_and_truncates() {
        let content = format!("<p>{}</p><p>{}</p>", "alpha ".repeat(30), "beta ".repeat(30));
        let excerpt = excerpt(&content);
        assert!(!excerpt.contains('<'));
        assert!(excerpt.chars().count() <= 250);
        assert!(excerpt.starts_with("alpha alpha"));
    }

    #[test]
    fn composed_article_is_published_and_flagged() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let draft = RewrittenDraft {
            title: "Dune: Part Three!!".to_string(),
            content: "<p>Body text.</p>".to_string(),
        };
        let article = compose_article(draft, &candidate(), now);
        assert_eq!(article.status, "published");
        assert!(article.ai_generated);
        assert_eq!(article.source_url, "https://example.com/dune-3");
        assert!(article.slug.starts_with("dune-part-three-"));
        assert_eq!(article.excerpt, "Body text.");
        assert_eq!(article.published_at, now);
    }
}
