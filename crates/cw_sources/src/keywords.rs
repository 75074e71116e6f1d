/// Whitelist that keeps a search result only when its title or summary
/// mentions the movie/TV world. The search APIs match loosely, so "film" in
/// a finance headline would otherwise slip through.
const KEYWORDS: &[&str] = &[
    "movie",
    "film",
    "cinema",
    "box office",
    "trailer",
    "tv series",
    "television",
    "season",
    "episode",
    "streaming",
    "netflix",
    "disney",
    "hbo",
    "prime video",
    "hulu",
    "apple tv",
    "paramount",
    "marvel",
    "dc studios",
    "actor",
    "actress",
    "director",
    "cast",
    "sequel",
    "prequel",
    "remake",
    "reboot",
    "franchise",
    "premiere",
    "hollywood",
    "showrunner",
    "oscars",
    "academy award",
    "emmy",
    "golden globe",
];

/// The OR-query both fetchers send upstream: English, entertainment terms,
/// most-recent-first is applied by each fetcher separately.
pub const SEARCH_QUERY: &str =
    "movie OR film OR \"TV series\" OR streaming OR trailer OR Netflix OR \"box office\" OR Hollywood";

pub fn is_entertainment(title: &str, description: &str) -> bool {
    let haystack = format!("{} {}", title, description).to_lowercase();
    KEYWORDS.iter().any(|keyword| haystack.contains(keyword))
}
