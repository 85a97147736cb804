use crate::catalog::Mood;
use clap::Parser;
use std::path::PathBuf;

/// moodsync - music that matches how you feel 🎵
#[derive(Parser, Debug)]
#[command(name = "moodsync", version, about)]
pub struct Args {
    /// Still image of your face used for expression detection
    #[arg(long, short = 'i')]
    pub image: Option<PathBuf>,

    /// TOML track catalog replacing the built-in one
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Start with this mood selected (joy, melancholy, focus, energy, serenity)
    #[arg(long, short = 'm')]
    pub mood: Option<Mood>,

    /// Print every mood with its tracks and exit
    #[arg(long)]
    pub list: bool,

    /// Do not open an audio device
    #[arg(long)]
    pub mute: bool,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,
}
