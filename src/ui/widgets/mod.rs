pub mod detect;
pub mod moods;
pub mod player;
pub mod toast;
