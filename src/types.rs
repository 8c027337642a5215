use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One library entry exactly as the API returned it.
///
/// The payload is kept as a raw JSON value; all fields are read through
/// accessors that treat `null` and wrongly typed values as absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSongRecord(Value);

impl RawSongRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn attributes(&self) -> Option<&Map<String, Value>> {
        self.0.get("attributes").and_then(Value::as_object)
    }

    fn attr(&self, key: &str) -> Option<&Value> {
        self.attributes()
            .and_then(|attrs| attrs.get(key))
            .filter(|v| !v.is_null())
    }

    fn attr_str(&self, key: &str) -> Option<&str> {
        self.attr(key).and_then(Value::as_str)
    }

    pub fn artist_name(&self) -> Option<&str> {
        self.attr_str("artistName")
    }

    pub fn title(&self) -> Option<&str> {
        self.attr_str("name")
    }

    pub fn album_name(&self) -> Option<&str> {
        self.attr_str("albumName")
    }

    pub fn genre_names(&self) -> Vec<String> {
        self.attr("genreNames")
            .and_then(Value::as_array)
            .map(|genres| {
                genres
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn duration_millis(&self) -> Option<i64> {
        let value = self.attr("durationInMillis")?;
        value
            .as_i64()
            .or_else(|| value.as_f64().map(|millis| millis.floor() as i64))
    }

    pub fn release_date(&self) -> Option<&str> {
        self.attr_str("releaseDate")
    }
}

impl From<Value> for RawSongRecord {
    fn from(value: Value) -> Self {
        Self::new(value)
    }
}

/// One page of the library listing.
#[derive(Debug, Clone, Default)]
pub struct LibraryPage {
    pub data: Vec<RawSongRecord>,
    pub next: Option<String>,
}

impl LibraryPage {
    /// Reads a page out of a decoded response body.
    ///
    /// A body without a usable `data` array yields an empty page; a missing,
    /// `null` or empty `next` ends pagination.
    pub fn from_value(body: &Value) -> Self {
        let data = body
            .get("data")
            .and_then(Value::as_array)
            .map(|items| items.iter().cloned().map(RawSongRecord::new).collect())
            .unwrap_or_default();
        let next = body
            .get("next")
            .and_then(Value::as_str)
            .filter(|next| !next.is_empty())
            .map(str::to_string);

        Self { data, next }
    }
}

/// The export view of one song, as written to the JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSong {
    pub artist: String,
    pub title: String,
    pub title_clean: String,
    pub album: String,
    #[serde(rename = "genre")]
    pub genres: Vec<String>,
    #[serde(rename = "duration")]
    pub duration_seconds: i64,
    pub year: String,
}

/// Body of the JSON export file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub export_date: String,
    pub total_songs: usize,
    pub songs: Vec<NormalizedSong>,
}

/// Paths of the two files written by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub text: PathBuf,
    pub json: PathBuf,
}

/// The two tokens the web player sends with every library request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub developer_token: String,
    pub user_token: String,
}

impl Credentials {
    pub fn new(developer_token: impl Into<String>, user_token: impl Into<String>) -> Self {
        Self {
            developer_token: developer_token.into(),
            user_token: user_token.into(),
        }
    }
}
