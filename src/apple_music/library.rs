use std::{fmt, sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    apple_music::transport::{HttpTransport, PageTransport},
    config::Config,
    logging::{self, LogSink},
    types::{Credentials, LibraryPage, RawSongRecord},
    utils,
};

/// First page of the library listing, relative to the API origin.
pub const LIBRARY_SONGS_PATH: &str = "/v1/me/library/songs?limit=100";

/// Hard cap on the number of pages requested in one fetch.
pub const MAX_PAGES: usize = 100;

/// Why a fetch produced nothing to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Developer or user token not configured. No request was made.
    MissingCredentials,
    /// Pagination ended without a single song, either because the library is
    /// empty or because the first page already failed.
    NoData,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::MissingCredentials => write!(f, "Tokens not found"),
            FetchError::NoData => write!(f, "No songs fetched"),
        }
    }
}

impl std::error::Error for FetchError {}

/// Pagination state of one `fetch` call.
struct FetchSession {
    songs: Vec<RawSongRecord>,
    cursor: Option<String>,
    pages: usize,
    max_pages: usize,
}

impl FetchSession {
    fn new(first_url: String, max_pages: usize) -> Self {
        Self {
            songs: Vec::new(),
            cursor: Some(first_url),
            pages: 0,
            max_pages,
        }
    }

    fn next_url(&self) -> Option<String> {
        if self.pages >= self.max_pages {
            return None;
        }
        self.cursor.clone()
    }
}

/// Pages through the user's library songs.
pub struct LibraryFetcher<T: PageTransport> {
    credentials: Option<Credentials>,
    api_base: String,
    max_pages: usize,
    show_progress: bool,
    transport: T,
    log: Arc<dyn LogSink>,
}

impl LibraryFetcher<HttpTransport> {
    /// Fetcher over HTTPS, logging to the global subscriber.
    pub fn from_config(config: &Config) -> Self {
        LibraryFetcher::new(config.credentials(), &config.api_base, HttpTransport::new())
    }
}

impl<T: PageTransport> LibraryFetcher<T> {
    pub fn new(credentials: Option<Credentials>, api_base: &str, transport: T) -> Self {
        Self {
            credentials,
            api_base: api_base.trim_end_matches('/').to_string(),
            max_pages: MAX_PAGES,
            show_progress: true,
            transport,
            log: logging::tracing_sink(),
        }
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn with_log(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = log;
        self
    }

    /// Turns the console spinner on or off.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn first_page_url(&self) -> String {
        format!("{}{}", self.api_base, LIBRARY_SONGS_PATH)
    }

    /// Retrieves every library song, page by page.
    ///
    /// Follows the `next` link of each page until there is none or
    /// [`MAX_PAGES`] pages have been read. A failed page is logged and ends
    /// pagination; the songs gathered so far are still returned. Each page is
    /// requested exactly once.
    ///
    /// # Errors
    ///
    /// - [`FetchError::MissingCredentials`] when a token is missing, before any request
    /// - [`FetchError::NoData`] when no song was gathered
    pub fn fetch(&mut self) -> Result<Vec<RawSongRecord>, FetchError> {
        let Some(credentials) = self.credentials.clone() else {
            self.log.error("Tokens not found, library scan not started");
            return Err(FetchError::MissingCredentials);
        };

        self.log.info("Starting library scan");

        let progress = self.progress_bar();
        let session = self.paginate(&credentials, &progress);
        self.transport.close();
        progress.finish();

        self.log.info(&format!(
            "Scan completed: {} songs total",
            session.songs.len()
        ));

        if session.songs.is_empty() {
            if session.pages > 0 {
                self.log.error("Library returned no songs");
            } else {
                self.log.error("No library page could be fetched");
            }
            return Err(FetchError::NoData);
        }

        Ok(session.songs)
    }

    fn paginate(&mut self, credentials: &Credentials, progress: &ProgressBar) -> FetchSession {
        let mut session = FetchSession::new(self.first_page_url(), self.max_pages);

        while let Some(url) = session.next_url() {
            let body = match self.transport.get_page(&url, credentials) {
                Ok(body) => body,
                Err(e) => {
                    self.log.error(&e.to_string());
                    self.log
                        .error(&format!("Failed to fetch page {}", session.pages + 1));
                    break;
                }
            };

            let page = LibraryPage::from_value(&body);
            let page_len = page.data.len();
            session.songs.extend(page.data);
            session.pages += 1;
            progress.set_position(session.songs.len() as u64);

            self.log.info(&format!(
                "Page {}: {} songs (total: {})",
                session.pages,
                page_len,
                session.songs.len()
            ));

            session.cursor = page.next.and_then(|next| {
                let resolved = utils::resolve_next_url(&self.api_base, &next);
                if resolved.is_none() {
                    self.log.error(&format!("Cannot resolve next page link: {}", next));
                }
                resolved
            });
        }

        if session.cursor.is_some() && session.pages >= session.max_pages {
            self.log.info(&format!(
                "Stopped after {} pages, more pages were available",
                session.pages
            ));
        }

        session
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::with_template("{spinner:.blue} Scanning library {pos} songs")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}
