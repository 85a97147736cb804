use super::mood::Mood;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// Audio locator: http(s) URL or local file path
    pub url: String,
    pub cover: String,
    pub mood: Mood,
}

impl Track {
    pub fn new(id: &str, title: &str, artist: &str, url: &str, cover: &str, mood: Mood) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            artist: artist.to_string(),
            url: url.to_string(),
            cover: cover.to_string(),
            mood,
        }
    }
}
