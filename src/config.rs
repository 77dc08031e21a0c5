use crate::state::InitialState;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// A spinning logo that grows with cursor distance and times how long the
/// mouse sits still
#[derive(Debug, Parser)]
#[command(name = "spinicon", version, about)]
pub struct Args {
    /// Initial rotation speed
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub speed: u8,

    /// Start with rotation disabled
    #[arg(long)]
    pub no_rotate: bool,

    /// Start with cursor-driven resizing disabled
    #[arg(long)]
    pub no_size: bool,

    /// Start with the stationary timer hidden
    #[arg(long)]
    pub no_timer: bool,

    /// Start with the settings panel open
    #[arg(long)]
    pub show_settings: bool,

    /// Rotation tick interval in milliseconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub rotation_tick_ms: u64,

    /// Stationary timer refresh interval in milliseconds
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..=1000))]
    pub timer_tick_ms: u64,

    /// Show the debug overlay
    #[arg(short, long)]
    pub debug: bool,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log filter directive, e.g. "debug" or "spinicon=trace"
    #[arg(long, env = "SPINICON_LOG", default_value = "info")]
    pub log_level: String,
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub initial: InitialState,
    pub rotation_period: Duration,
    pub stationary_period: Duration,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            initial: InitialState::default(),
            rotation_period: Duration::from_millis(10),
            stationary_period: Duration::from_millis(100),
            log_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl From<Args> for Settings {
    fn from(args: Args) -> Self {
        Settings {
            initial: InitialState {
                rotation_speed: args.speed,
                rotate_enabled: !args.no_rotate,
                size_enabled: !args.no_size,
                stationary_enabled: !args.no_timer,
                sidebar_visible: args.show_settings,
                debug: args.debug,
            },
            rotation_period: Duration::from_millis(args.rotation_tick_ms),
            stationary_period: Duration::from_millis(args.timer_tick_ms),
            log_file: args.log_file,
            log_filter: args.log_level,
        }
    }
}
