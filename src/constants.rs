use crossterm::style::Color;

// --- Surface ---
pub const WIDTH: i32 = 800;
pub const HEIGHT: i32 = 600;
pub const FPS: u32 = 60;
pub const TITLE_PREFIX: &str = "Meteor Game";

// --- Player ---
pub const PLAYER_SIZE: i32 = 50;

// --- Meteors ---
pub const METEOR_SIZE: i32 = 32;
pub const INITIAL_METEOR_SPEED: u32 = 1;
pub const MAX_METEOR_SPEED: u32 = 5;
pub const INITIAL_SPAWN_INTERVAL: u32 = 80; // Ticks between spawns
pub const SPAWN_INTERVAL_STEP: u32 = 5;
pub const MIN_SPAWN_INTERVAL: u32 = 5;
pub const POINTS_PER_LEVEL: u32 = 10; // Difficulty steps up every 10 points

// --- End screen ---
pub const BUTTON_WIDTH: i32 = 200;
pub const BUTTON_HEIGHT: i32 = 50;
pub const RESTART_BUTTON_OFFSET: i32 = 50; // Below the vertical centre
pub const QUIT_BUTTON_OFFSET: i32 = 120;

// --- Palette ---
pub const BACKGROUND_COLOR: Color = Color::Black;
pub const PLAYER_COLOR: Color = Color::Rgb { r: 0, g: 157, b: 255 };
pub const METEOR_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };
pub const RESTART_COLOR: Color = Color::Rgb { r: 0, g: 255, b: 0 };
pub const QUIT_COLOR: Color = Color::Rgb { r: 255, g: 0, b: 0 };
pub const BANNER_COLOR: Color = Color::White;
pub const LABEL_COLOR: Color = Color::Black;
