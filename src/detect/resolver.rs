use super::traits::DetectedExpression;
use crate::catalog::Mood;
use crate::error::{MoodError, MoodResult};

/// Engine vocabulary in canonical order. Earlier labels win exact ties.
pub const EXPRESSION_ORDER: [&str; 7] = [
    "neutral",
    "happy",
    "sad",
    "angry",
    "fearful",
    "disgusted",
    "surprised",
];

/// Expression → mood lookup. Anything missing falls back to [`DEFAULT_MOOD`].
pub const EXPRESSION_MOODS: &[(&str, Mood)] = &[
    ("happy", Mood::Joy),
    ("sad", Mood::Melancholy),
    ("angry", Mood::Serenity),
    ("neutral", Mood::Focus),
    ("surprised", Mood::Energy),
    ("fearful", Mood::Serenity),
    ("disgusted", Mood::Serenity),
];

pub const DEFAULT_MOOD: Mood = Mood::Focus;

/// How the user asked for a mood
#[derive(Debug, Clone, PartialEq)]
pub enum MoodInput {
    Direct(Mood),
    Detected(Option<DetectedExpression>),
}

fn normalize(label: &str) -> String {
    label.trim().to_ascii_lowercase()
}

/// Rank used for tie-breaking: vocabulary position, then unknown labels
/// lexicographically after the whole vocabulary.
fn rank(label: &str) -> (usize, String) {
    let label = normalize(label);
    let pos = EXPRESSION_ORDER
        .iter()
        .position(|known| *known == label)
        .unwrap_or(EXPRESSION_ORDER.len());
    (pos, label)
}

/// The label with the highest finite score, ties broken by [`rank`].
pub fn dominant_expression(expressions: &DetectedExpression) -> Option<&str> {
    let mut best: Option<(&str, f32)> = None;
    for (label, &score) in &expressions.scores {
        if !score.is_finite() {
            continue;
        }
        best = match best {
            None => Some((label.as_str(), score)),
            Some((current, top)) => {
                if score > top || (score == top && rank(label) < rank(current)) {
                    Some((label.as_str(), score))
                } else {
                    Some((current, top))
                }
            }
        };
    }
    best.map(|(label, _)| label)
}

pub fn mood_for_expression(label: &str) -> Mood {
    let label = normalize(label);
    EXPRESSION_MOODS
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, mood)| *mood)
        .unwrap_or(DEFAULT_MOOD)
}

/// Resolve either input path into one canonical mood.
///
/// `Detected(None)` means the engine saw no face. An expression set without
/// a single usable score is treated the same way.
pub fn resolve(input: MoodInput) -> MoodResult<Mood> {
    match input {
        MoodInput::Direct(mood) => Ok(mood),
        MoodInput::Detected(None) => Err(MoodError::NoSubjectDetected),
        MoodInput::Detected(Some(expressions)) => {
            let label = dominant_expression(&expressions).ok_or(MoodError::NoSubjectDetected)?;
            let mood = mood_for_expression(label);
            tracing::debug!("Dominant expression '{}' -> {}", label, mood);
            Ok(mood)
        }
    }
}
