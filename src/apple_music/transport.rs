use std::{fmt, time::Duration};

use reqwest::{
    StatusCode,
    blocking::Client,
    header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, ORIGIN, REFERER, USER_AGENT},
};
use serde_json::Value;

use crate::types::Credentials;

/// Per-request timeout for library pages.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

const MEDIA_USER_TOKEN: &str = "media-user-token";
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64)";
const WEB_PLAYER_ORIGIN: &str = "https://music.apple.com";
const WEB_PLAYER_REFERER: &str = "https://music.apple.com/";

/// Failure of a single page request.
#[derive(Debug)]
pub enum PageFetchError {
    Status { status: u16, url: String },
    Timeout { url: String },
    Transport(String),
    Decode { url: String, message: String },
}

impl PageFetchError {
    fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PageFetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            PageFetchError::Transport(err.to_string())
        }
    }
}

impl fmt::Display for PageFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageFetchError::Status { status, url } => write!(f, "HTTP {}: {}", status, url),
            PageFetchError::Timeout { url } => write!(f, "Timeout: {}", url),
            PageFetchError::Transport(msg) => write!(f, "Error: {}", msg),
            PageFetchError::Decode { url, message } => {
                write!(f, "Invalid response body from {}: {}", url, message)
            }
        }
    }
}

impl std::error::Error for PageFetchError {}

/// Something that can GET one page of the library listing.
///
/// A transport holds at most one open session. It is opened by the first
/// `get_page` call and released by `close`.
pub trait PageTransport {
    /// Fetches `url` and returns the decoded JSON body of a `200 OK` response.
    fn get_page(&mut self, url: &str, credentials: &Credentials) -> Result<Value, PageFetchError>;

    /// Releases the session. Safe to call when nothing is open.
    fn close(&mut self);
}

/// Blocking HTTPS transport with a keep-alive connection pool.
pub struct HttpTransport {
    timeout: Duration,
    client: Option<Client>,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            timeout: REQUEST_TIMEOUT,
            client: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_open(&self) -> bool {
        self.client.is_some()
    }

    fn session(&mut self) -> Result<&Client, PageFetchError> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| PageFetchError::Transport(e.to_string()))?;
            self.client = Some(client);
        }

        self.client
            .as_ref()
            .ok_or_else(|| PageFetchError::Transport("HTTP session not available".to_string()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl PageTransport for HttpTransport {
    fn get_page(&mut self, url: &str, credentials: &Credentials) -> Result<Value, PageFetchError> {
        let headers = request_headers(credentials)?;
        let client = self.session()?;

        let response = client
            .get(url)
            .headers(headers)
            .send()
            .map_err(|e| PageFetchError::from_reqwest(url, e))?;

        if response.status() != StatusCode::OK {
            return Err(PageFetchError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        response.json::<Value>().map_err(|e| {
            if e.is_timeout() {
                PageFetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                PageFetchError::Decode {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn close(&mut self) {
        self.client = None;
    }
}

/// Headers the library endpoint expects from the web player.
pub fn request_headers(credentials: &Credentials) -> Result<HeaderMap, PageFetchError> {
    let invalid = |name: &str| PageFetchError::Transport(format!("{} is not a valid header value", name));

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", credentials.developer_token))
            .map_err(|_| invalid("developer token"))?,
    );
    headers.insert(
        HeaderName::from_static(MEDIA_USER_TOKEN),
        HeaderValue::from_str(&credentials.user_token).map_err(|_| invalid("user token"))?,
    );
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(ORIGIN, HeaderValue::from_static(WEB_PLAYER_ORIGIN));
    headers.insert(REFERER, HeaderValue::from_static(WEB_PLAYER_REFERER));

    Ok(headers)
}
