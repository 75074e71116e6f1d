use std::collections::HashSet;

use cw_core::{Candidate, RecentEntry};

#[derive(Debug, Clone)]
pub struct DedupConfig {
    /// Word-overlap ratio above which two titles count as the same story.
    pub similarity_threshold: f64,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.7,
        }
    }
}

struct TitleKey {
    normalized: String,
    words: HashSet<String>,
}

impl TitleKey {
    fn new(title: &str) -> Self {
        let normalized = normalize_title(title);
        let words = normalized.split_whitespace().map(str::to_string).collect();
        Self { normalized, words }
    }

    fn matches(&self, other: &TitleKey, threshold: f64) -> bool {
        self.normalized == other.normalized
            || word_overlap_ratio(&self.words, &other.words) > threshold
    }
}

/// Greedy single-pass accept/reject scan over the merged fetcher output.
/// Drops exact URL repeats and near-duplicate titles against both the
/// current batch and the recent-history index, preserves encounter order,
/// and truncates to `limit`. Deliberately not a global clustering: missing a
/// near-duplicate is tolerable, dropping a distinct story is not.
pub fn select_unique(
    candidates: Vec<Candidate>,
    history: &[RecentEntry],
    limit: usize,
    config: &DedupConfig,
) -> Vec<Candidate> {
    let mut seen_urls: HashSet<String> = history.iter().map(|e| e.url.clone()).collect();
    let mut seen_titles: Vec<TitleKey> = history.iter().map(|e| TitleKey::new(&e.title)).collect();

    let mut accepted = Vec::new();
    for candidate in candidates {
        if accepted.len() == limit {
            break;
        }
        if seen_urls.contains(&candidate.url) {
            continue;
        }
        let key = TitleKey::new(&candidate.title);
        if seen_titles
            .iter()
            .any(|seen| seen.matches(&key, config.similarity_threshold))
        {
            continue;
        }
        seen_urls.insert(candidate.url.clone());
        seen_titles.push(key);
        accepted.push(candidate);
    }
    accepted
}

/// Lowercase, strip punctuation, collapse whitespace.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// |intersection of word sets| / max(|A|, |B|).
pub fn word_overlap_ratio(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let larger = a.len().max(b.len());
    if larger == 0 {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / larger as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use cw_core::Provider;

    fn candidate(url: &str, title: &str) -> Candidate {
        Candidate {
            title: title.to_string(),
            description: String::new(),
            url: url.to_string(),
            image_url: None,
            source_name: "Test Wire".to_string(),
            published_at: None,
            provider: Provider::NewsApi,
        }
    }

    fn entry(url: &str, title: &str) -> RecentEntry {
        RecentEntry {
            url: url.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn keeps_at_most_one_per_url() {
        let candidates = vec![
            candidate("https://a.test/1", "Story one"),
            candidate("https://a.test/1", "Completely different headline"),
            candidate("https://a.test/2", "Another tale entirely"),
        ];
        let kept = select_unique(candidates, &[], 10, &DedupConfig::default());
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].title, "Story one");
    }

    #[test]
    fn marvel_example_counts_as_duplicate() {
        let a: HashSet<String> = normalize_title("Marvel Reveals New Avengers Cast")
            .split_whitespace()
            .map(str::to_string)
            .collect();
        let b: HashSet<String> = normalize_title("Marvel Reveals Avengers Cast Lineup")
            .split_whitespace()
            .map(str::to_string)
            .collect();
        assert!((word_overlap_ratio(&a, &b) - 0.8).abs() < 1e-9);

        let candidates = vec![
            candidate("https://a.test/1", "Marvel Reveals New Avengers Cast"),
            candidate("https://b.test/1", "Marvel Reveals Avengers Cast Lineup"),
        ];
        let kept = select_unique(candidates, &[], 10, &DedupConfig::default());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].url, "https://a.test/1");
    }

    #[test]
    fn history_blocks_both_url_and_title() {
        let history = vec![entry(
            "https://old.test/1",
            "Marvel Reveals New Avengers Cast",
        )];
        let candidates = vec![
            candidate("https://old.test/1", "Fresh headline, stale url"),
            candidate("https://b.test/1", "Marvel Reveals Avengers Cast Lineup"),
            candidate("https://c.test/1", "An unrelated festival report"),
        ];
        let kept = select_unique(candidates, &history, 10, &DedupConfig::default());
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].url, "https://c.test/1");
    }

    #[test]
    fn normalization_ignores_punctuation_and_case() {
        assert_eq!(
            normalize_title("  Dune: Part Three!!  (2026)"),
            "dune part three 2026"
        );
    }

    #[test]
    fn preserves_order_and_truncates_to_limit() {
        let titles = [
            "Dune sequel sets release date",
            "Netflix cancels beloved animated show",
            "Festival jury announces winners",
            "Studio greenlights heist thriller",
            "Streaming numbers climb again",
        ];
        let candidates = titles
            .iter()
            .enumerate()
            .map(|(i, title)| candidate(&format!("https://a.test/{}", i), title))
            .collect();
        let kept = select_unique(candidates, &[], 3, &DedupConfig::default());
        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].url, "https://a.test/0");
        assert_eq!(kept[2].url, "https://a.test/2");
    }

    #[test]
    fn distinct_titles_survive() {
        let candidates = vec![
            candidate("https://a.test/1", "Dune sequel sets release date"),
            candidate("https://b.test/1", "Netflix cancels beloved animated show"),
        ];
        let kept = select_unique(candidates, &[], 10, &DedupConfig::default());
        assert_eq!(kept.len(), 2);
    }
}
