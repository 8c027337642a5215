//! # Apple Music Integration Module
//!
//! Reads a user's saved songs through the same API the Apple Music web player
//! uses. There is no OAuth flow: the user copies the developer (bearer) token
//! and the `media-user-token` out of the browser's network inspector, and both
//! are sent with every request.
//!
//! ```text
//! CLI Layer
//!     ↓
//! LibraryFetcher (pagination, page cap, progress, logging)
//!     ↓
//! PageTransport (one GET per page, 20s timeout)
//!     ↓
//! amp-api.music.apple.com
//! ```
//!
//! ## Pagination
//!
//! The first request goes to `/v1/me/library/songs?limit=100`. Each response
//! carries a `data` array and, while more songs remain, a `next` link that is
//! usually relative to the API origin. At most 100 pages are read.
//!
//! ## Failure handling
//!
//! Every page is requested once. A non-200 status, a timeout or a transport
//! error is logged and ends pagination; the songs gathered up to that point are
//! returned as the result of the scan.
//!
//! ## Usage
//!
//! ```rust
//! let mut fetcher = LibraryFetcher::from_config(&config);
//! match fetcher.fetch() {
//!     Ok(songs) => println!("{} songs", songs.len()),
//!     Err(FetchError::MissingCredentials) => show_token_help(),
//!     Err(FetchError::NoData) => println!("nothing fetched"),
//! }
//! ```

pub mod library;
pub mod transport;

pub use library::{FetchError, LIBRARY_SONGS_PATH, LibraryFetcher, MAX_PAGES};
pub use transport::{HttpTransport, PageFetchError, PageTransport, REQUEST_TIMEOUT};
