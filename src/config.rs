use clap::Parser;
use log::LevelFilter;

use crate::constants::FPS;

#[derive(Parser, Debug, Clone)]
#[command(name = "meteor-game")]
#[command(about = "Click the falling meteors before they reach you", long_about = None)]
pub struct LaunchOptions {
    /// Run headless on an in-memory screen with a scripted input
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Grid width in cells for debug mode
    #[arg(long, default_value_t = 80)]
    pub width: u16,

    /// Grid height in cells for debug mode
    #[arg(long, default_value_t = 24)]
    pub height: u16,

    /// Stop after this many ticks
    #[arg(long)]
    pub max_frames: Option<u64>,

    /// Tick rate cap
    #[arg(long, default_value_t = FPS)]
    pub fps: u32,

    /// Do not ring the terminal bell for sound cues
    #[arg(long, default_value_t = false)]
    pub mute: bool,

    #[arg(long, default_value = "meteor-game.log")]
    pub log_file: String,

    /// off, error, warn, info, debug or trace
    #[arg(long, default_value = "info", value_parser = parse_level)]
    pub log_level: LevelFilter,
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value.parse().map_err(|_| format!("unknown log level `{}`", value))
}
