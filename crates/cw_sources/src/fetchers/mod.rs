use std::time::Duration;

use reqwest::Client;

pub mod gnews;
pub mod newsapi;

pub use gnews::GnewsFetcher;
pub use newsapi::NewsApiFetcher;

/// Results are filtered after the fact, so ask upstream for a few times the
/// requested count.
pub(crate) fn page_size(count: usize) -> usize {
    (count * 3).clamp(10, 50)
}

pub(crate) fn http_client() -> Client {
    Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent("cinewire/0.1")
        .build()
        .unwrap_or_else(|_| Client::new())
}
