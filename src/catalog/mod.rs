pub mod mood;
pub mod track;

pub use mood::{Mood, MoodDescriptor, ParseMoodError};
pub use track::Track;

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid catalog file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Catalog contains no tracks")]
    Empty,

    #[error("Duplicate track id in catalog: {0}")]
    DuplicateId(String),
}

#[derive(Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tracks: Vec<Track>,
}

/// Static, read-only track list loaded once at startup 📀
#[derive(Debug, Clone)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::new();
        for track in &tracks {
            if !seen.insert(track.id.as_str()) {
                return Err(CatalogError::DuplicateId(track.id.clone()));
            }
        }
        Ok(Self { tracks })
    }

    pub fn builtin() -> Self {
        const SONG: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song";
        const COVER: &str = "https://images.unsplash.com/photo";
        let tracks = vec![
            Track::new("1", "Sunshine Vibes", "Sunny Ray", &format!("{SONG}-1.mp3"), &format!("{COVER}-1470225620780-dba8ba36b745?w=800&q=80"), Mood::Joy),
            Track::new("2", "Midnight Rain", "Luna Mist", &format!("{SONG}-2.mp3"), &format!("{COVER}-1514525253344-99a4299966c2?w=800&q=80"), Mood::Melancholy),
            Track::new("3", "Deep Focus", "The Architect", &format!("{SONG}-3.mp3"), &format!("{COVER}-1459749411177-042180ce673c?w=800&q=80"), Mood::Focus),
            Track::new("4", "Electric Surge", "Volt", &format!("{SONG}-4.mp3"), &format!("{COVER}-1493225255756-d9584f8606e9?w=800&q=80"), Mood::Energy),
            Track::new("5", "Ocean Breeze", "Zen Garden", &format!("{SONG}-5.mp3"), &format!("{COVER}-1453738558379-6451299c8907?w=800&q=80"), Mood::Serenity),
            Track::new("6", "Golden Hour", "Skyline", &format!("{SONG}-6.mp3"), &format!("{COVER}-1465821508027-561b82d5df75?w=800&q=80"), Mood::Joy),
        ];
        Self { tracks }
    }

    /// Load a `[[tracks]]` TOML file. Descriptors always stay built-in.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: CatalogFile = toml::from_str(&content)?;
        let catalog = Self::new(file.tracks)?;
        tracing::info!("Loaded {} tracks from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks tagged with `mood`, in catalog order. No mood, no tracks.
    pub fn filter(&self, mood: Option<Mood>) -> Vec<Track> {
        match mood {
            Some(mood) => self
                .tracks
                .iter()
                .filter(|t| t.mood == mood)
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ids(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_filter_keeps_catalog_order() {
        let catalog = Catalog::builtin();
        let joy = catalog.filter(Some(Mood::Joy));
        assert_eq!(ids(&joy), vec!["1", "6"]);

        for mood in Mood::ALL {
            let tracks = catalog.filter(Some(mood));
            assert!(!tracks.is_empty());
            assert!(tracks.iter().all(|t| t.mood == mood));
        }
    }

    #[test]
    fn test_filter_without_mood_is_empty() {
        assert!(Catalog::builtin().filter(None).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.filter(Some(Mood::Focus)), catalog.filter(Some(Mood::Focus)));
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let a = Track::new("7", "A", "X", "a.mp3", "", Mood::Joy);
        let b = Track::new("7", "B", "Y", "b.mp3", "", Mood::Focus);
        match Catalog::new(vec![a, b]) {
            Err(CatalogError::DuplicateId(id)) => assert_eq!(id, "7"),
            other => panic!("expected duplicate id error, got {:?}", other),
        }
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_load_from_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[tracks]]
id = "a"
title = "Rainfall"
artist = "Nimbus"
url = "/music/rainfall.flac"
cover = ""
mood = "melancholy"

[[tracks]]
id = "b"
title = "Sprint"
artist = "Pace"
url = "/music/sprint.flac"
cover = ""
mood = "energy"
"#
        )
        .unwrap();

        let catalog = Catalog::load(file.path()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(ids(&catalog.filter(Some(Mood::Energy))), vec!["b"]);
        assert!(catalog.filter(Some(Mood::Joy)).is_empty());
    }

    #[test]
    fn test_load_rejects_unknown_mood() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[[tracks]]\nid = \"a\"\ntitle = \"T\"\nartist = \"A\"\nurl = \"u\"\ncover = \"\"\nmood = \"happy\"\n"
        )
        .unwrap();
        assert!(matches!(Catalog::load(file.path()), Err(CatalogError::Parse(_))));
    }
}
