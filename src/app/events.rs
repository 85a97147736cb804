use crate::detect::{DetectionOutcome, Ticket};
use crate::player::AudioEvent;
use crossterm::event::Event;

pub enum AppEvent {
    Input(Event),
    EngineLoaded(Result<(), String>),
    DetectionFinished(Ticket, DetectionOutcome),
    Audio(AudioEvent),
    Tick,
}
