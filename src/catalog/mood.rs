use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The five canonical moods a playlist can be built around 🎭
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Joy,
    Melancholy,
    Focus,
    Energy,
    Serenity,
}

/// Display metadata for a mood. One static record per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodDescriptor {
    pub mood: Mood,
    pub label: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mood '{0}' (expected one of: joy, melancholy, focus, energy, serenity)")]
pub struct ParseMoodError(pub String);

const DESCRIPTORS: [MoodDescriptor; 5] = [
    MoodDescriptor {
        mood: Mood::Joy,
        label: "Joy",
        icon: "Sun",
        color: "from-yellow-400 to-orange-500",
        description: "Upbeat and happy tunes to brighten your day",
    },
    MoodDescriptor {
        mood: Mood::Melancholy,
        label: "Melancholy",
        icon: "CloudRain",
        color: "from-blue-400 to-indigo-600",
        description: "Deep, emotional melodies for reflective moments",
    },
    MoodDescriptor {
        mood: Mood::Focus,
        label: "Focus",
        icon: "Brain",
        color: "from-emerald-400 to-teal-600",
        description: "Lo-fi and ambient beats for deep work",
    },
    MoodDescriptor {
        mood: Mood::Energy,
        label: "Energy",
        icon: "Zap",
        color: "from-red-500 to-purple-600",
        description: "High-octane tracks to get you moving",
    },
    MoodDescriptor {
        mood: Mood::Serenity,
        label: "Serenity",
        icon: "Wind",
        color: "from-cyan-400 to-blue-500",
        description: "Calm and peaceful soundscapes for relaxation",
    },
];

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Joy,
        Mood::Melancholy,
        Mood::Focus,
        Mood::Energy,
        Mood::Serenity,
    ];

    pub fn descriptor(self) -> &'static MoodDescriptor {
        // DESCRIPTORS is laid out in declaration order
        &DESCRIPTORS[self as usize]
    }

    pub fn descriptors() -> &'static [MoodDescriptor] {
        &DESCRIPTORS
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Joy => "joy",
            Mood::Melancholy => "melancholy",
            Mood::Focus => "focus",
            Mood::Energy => "energy",
            Mood::Serenity => "serenity",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ParseMoodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| ParseMoodError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_matches_variant() {
        for mood in Mood::ALL {
            assert_eq!(mood.descriptor().mood, mood);
        }
        assert_eq!(Mood::Serenity.descriptor().icon, "Wind");
    }

    #[test]
    fn test_parse_validates_membership() {
        assert_eq!(" Joy ".parse::<Mood>(), Ok(Mood::Joy));
        assert_eq!("serenity".parse::<Mood>(), Ok(Mood::Serenity));
        assert!("happy".parse::<Mood>().is_err());
        assert!("".parse::<Mood>().is_err());
    }
}
