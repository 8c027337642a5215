use std::{collections::VecDeque, sync::Arc};

use music_export::{
    apple_music::{FetchError, LibraryFetcher, MAX_PAGES, PageFetchError, PageTransport},
    logging::MemorySink,
    types::Credentials,
};
use serde_json::{Value, json};

const API_BASE: &str = "https://api.test";

// Scripted transport: hands out the queued responses in order and records
// every requested URL.
#[derive(Default)]
struct ScriptedTransport {
    responses: VecDeque<Result<Value, PageFetchError>>,
    fallback: Option<Value>,
    requested: Vec<String>,
    open: bool,
    closes: usize,
}

impl ScriptedTransport {
    fn new(responses: Vec<Result<Value, PageFetchError>>) -> Self {
        Self {
            responses: responses.into(),
            ..Default::default()
        }
    }

    // Answers every request with the same body once the queue is empty.
    fn repeating(body: Value) -> Self {
        Self {
            fallback: Some(body),
            ..Default::default()
        }
    }
}

impl PageTransport for ScriptedTransport {
    fn get_page(&mut self, url: &str, _credentials: &Credentials) -> Result<Value, PageFetchError> {
        self.open = true;
        self.requested.push(url.to_string());
        match self.responses.pop_front() {
            Some(response) => response,
            None => self.fallback.clone().ok_or(PageFetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }

    fn close(&mut self) {
        self.open = false;
        self.closes += 1;
    }
}

fn credentials() -> Option<Credentials> {
    Some(Credentials::new("dev-token", "user-token"))
}

fn song(id: &str, artist: &str, name: &str) -> Value {
    json!({
        "id": id,
        "type": "library-songs",
        "attributes": { "artistName": artist, "name": name }
    })
}

fn page(ids: &[&str], next: Option<&str>) -> Value {
    let data: Vec<Value> = ids.iter().map(|id| song(id, "Artist", id)).collect();
    match next {
        Some(next) => json!({ "data": data, "next": next }),
        None => json!({ "data": data }),
    }
}

fn build_fetcher(transport: ScriptedTransport) -> (LibraryFetcher<ScriptedTransport>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let fetcher = LibraryFetcher::new(credentials(), API_BASE, transport)
        .with_log(sink.clone())
        .with_progress(false);
    (fetcher, sink)
}

fn ids(songs: &[music_export::types::RawSongRecord]) -> Vec<String> {
    songs
        .iter()
        .map(|s| s.id().unwrap_or_default().to_string())
        .collect()
}

#[test]
fn test_missing_credentials_makes_no_request() {
    let transport = ScriptedTransport::new(vec![Ok(page(&["a"], None))]);
    let mut fetcher = LibraryFetcher::new(None, API_BASE, transport).with_progress(false);

    assert_eq!(fetcher.fetch(), Err(FetchError::MissingCredentials));
    assert!(fetcher.transport().requested.is_empty());
    assert_eq!(fetcher.transport().closes, 0);
}

#[test]
fn test_first_page_url() {
    let (fetcher, _) = build_fetcher(ScriptedTransport::default());
    assert_eq!(
        fetcher.first_page_url(),
        "https://api.test/v1/me/library/songs?limit=100"
    );
}

#[test]
fn test_fetch_concatenates_pages_in_order() {
    let transport = ScriptedTransport::new(vec![
        Ok(page(&["1", "2"], Some("/v1/me/library/songs?offset=2"))),
        Ok(page(&["3"], Some("/v1/me/library/songs?offset=3"))),
        Ok(page(&["4", "5"], None)),
    ]);
    let (mut fetcher, sink) = build_fetcher(transport);

    let songs = fetcher.fetch().expect("songs");

    assert_eq!(ids(&songs), vec!["1", "2", "3", "4", "5"]);
    assert_eq!(
        fetcher.transport().requested,
        vec![
            "https://api.test/v1/me/library/songs?limit=100",
            "https://api.test/v1/me/library/songs?offset=2",
            "https://api.test/v1/me/library/songs?offset=3",
        ]
    );

    let messages = sink.messages();
    assert!(messages.contains(&"Page 1: 2 songs (total: 2)".to_string()));
    assert!(messages.contains(&"Page 3: 2 songs (total: 5)".to_string()));
    assert!(messages.contains(&"Scan completed: 5 songs total".to_string()));
    assert!(sink.errors().is_empty());
}

#[test]
fn test_absolute_next_link_is_used_as_is() {
    let transport = ScriptedTransport::new(vec![
        Ok(page(&["1"], Some("https://mirror.test/v1/me/library/songs?offset=1"))),
        Ok(page(&["2"], None)),
    ]);
    let (mut fetcher, _) = build_fetcher(transport);

    fetcher.fetch().expect("songs");

    assert_eq!(
        fetcher.transport().requested[1],
        "https://mirror.test/v1/me/library/songs?offset=1"
    );
}

#[test]
fn test_null_or_empty_next_ends_pagination() {
    let transport = ScriptedTransport::new(vec![
        Ok(json!({ "data": [song("1", "A", "x")], "next": null })),
        Ok(page(&["never"], None)),
    ]);
    let (mut fetcher, _) = build_fetcher(transport);
    assert_eq!(ids(&fetcher.fetch().expect("songs")), vec!["1"]);
    assert_eq!(fetcher.transport().requested.len(), 1);

    let transport = ScriptedTransport::new(vec![
        Ok(json!({ "data": [song("1", "A", "x")], "next": "" })),
        Ok(page(&["never"], None)),
    ]);
    let (mut fetcher, _) = build_fetcher(transport);
    assert_eq!(ids(&fetcher.fetch().expect("songs")), vec!["1"]);
    assert_eq!(fetcher.transport().requested.len(), 1);
}

#[test]
fn test_fetch_stops_at_page_cap() {
    let transport = ScriptedTransport::repeating(page(&["x"], Some("/v1/me/library/songs?more")));
    let (mut fetcher, sink) = build_fetcher(transport);

    let songs = fetcher.fetch().expect("songs");

    assert_eq!(MAX_PAGES, 100);
    assert_eq!(fetcher.transport().requested.len(), MAX_PAGES);
    assert_eq!(songs.len(), MAX_PAGES);
    assert!(
        sink.messages()
            .contains(&"Stopped after 100 pages, more pages were available".to_string())
    );
}

#[test]
fn test_custom_page_cap() {
    let transport = ScriptedTransport::repeating(page(&["x", "y"], Some("/next")));
    let (fetcher, _) = build_fetcher(transport);
    let mut fetcher = fetcher.with_max_pages(3);

    let songs = fetcher.fetch().expect("songs");

    assert_eq!(fetcher.transport().requested.len(), 3);
    assert_eq!(songs.len(), 6);
}

#[test]
fn test_server_error_keeps_earlier_pages() {
    let transport = ScriptedTransport::new(vec![
        Ok(page(&["1", "2"], Some("/v1/me/library/songs?offset=2"))),
        Err(PageFetchError::Status {
            status: 500,
            url: "https://api.test/v1/me/library/songs?offset=2".to_string(),
        }),
        Ok(page(&["never"], None)),
    ]);
    let (mut fetcher, sink) = build_fetcher(transport);

    let songs = fetcher.fetch().expect("songs");

    assert_eq!(ids(&songs), vec!["1", "2"]);
    assert_eq!(fetcher.transport().requested.len(), 2);
    assert_eq!(
        sink.errors(),
        vec![
            "HTTP 500: https://api.test/v1/me/library/songs?offset=2".to_string(),
            "Failed to fetch page 2".to_string(),
        ]
    );
}

#[test]
fn test_timeout_on_first_page_is_no_data() {
    let transport = ScriptedTransport::new(vec![Err(PageFetchError::Timeout {
        url: "https://api.test/v1/me/library/songs?limit=100".to_string(),
    })]);
    let (mut fetcher, sink) = build_fetcher(transport);

    assert_eq!(fetcher.fetch(), Err(FetchError::NoData));
    assert_eq!(fetcher.transport().requested.len(), 1);

    let errors = sink.errors();
    assert!(errors.contains(&"Timeout: https://api.test/v1/me/library/songs?limit=100".to_string()));
    assert!(errors.contains(&"No library page could be fetched".to_string()));
}

#[test]
fn test_empty_library_is_no_data() {
    let transport = ScriptedTransport::new(vec![Ok(json!({ "data": [] }))]);
    let (mut fetcher, sink) = build_fetcher(transport);

    assert_eq!(fetcher.fetch(), Err(FetchError::NoData));
    assert!(sink.errors().contains(&"Library returned no songs".to_string()));
}

#[test]
fn test_body_without_data_counts_as_empty_page() {
    let transport = ScriptedTransport::new(vec![
        Ok(json!({ "next": "/v1/me/library/songs?offset=0" })),
        Ok(page(&["1"], None)),
    ]);
    let (mut fetcher, _) = build_fetcher(transport);

    assert_eq!(ids(&fetcher.fetch().expect("songs")), vec!["1"]);
}

#[test]
fn test_transport_closed_on_every_exit_path() {
    let transport = ScriptedTransport::new(vec![Ok(page(&["1"], None))]);
    let (mut fetcher, _) = build_fetcher(transport);
    fetcher.fetch().expect("songs");
    assert!(!fetcher.transport().open);
    assert_eq!(fetcher.transport().closes, 1);

    let transport = ScriptedTransport::new(vec![Err(PageFetchError::Transport(
        "connection reset".to_string(),
    ))]);
    let (mut fetcher, _) = build_fetcher(transport);
    assert_eq!(fetcher.fetch(), Err(FetchError::NoData));
    assert!(!fetcher.transport().open);
    assert_eq!(fetcher.transport().closes, 1);
}

#[test]
fn test_fetch_is_repeatable() {
    let transport = ScriptedTransport::new(vec![
        Ok(page(&["1"], None)),
        Ok(page(&["2", "3"], None)),
    ]);
    let (mut fetcher, _) = build_fetcher(transport);

    assert_eq!(ids(&fetcher.fetch().expect("first")), vec!["1"]);
    assert_eq!(ids(&fetcher.fetch().expect("second")), vec!["2", "3"]);
    assert_eq!(fetcher.transport().closes, 2);
}
