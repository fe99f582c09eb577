use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Built-in scenes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    BouncingSpheres,
    CheckeredSpheres,
    Earth,
    PerlinSpheres,
    Quads,
    PlanarShapes,
    SimpleLights,
    CornellBox,
    CornellSmoke,
}

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "A CPU path tracer")]
pub struct Args {
    /// Scene to render
    #[arg(long, value_enum, default_value = "bouncing-spheres", help = "Scene to render")]
    pub scene: SceneKind,

    /// Image width in pixels (overrides the scene default)
    #[arg(long, help = "Image width in pixels (overrides the scene default)")]
    pub width: Option<u32>,

    /// Number of samples per pixel (overrides the scene default)
    #[arg(long, short = 's', help = "Number of samples per pixel (overrides the scene default)")]
    pub samples_per_pixel: Option<u32>,

    /// Maximum ray bounce depth (overrides the scene default)
    #[arg(long, help = "Maximum ray bounce depth (overrides the scene default)")]
    pub max_depth: Option<u32>,

    /// Seed for the random number generator
    #[arg(long, default_value = "0", help = "Seed for the random number generator")]
    pub seed: u64,

    /// Output file path (.ppm for plain text, .png for 8-bit)
    #[arg(short, long, default_value = "output.ppm", help = "Output file path (.ppm for plain text, .png for 8-bit)")]
    pub output: String,

    /// Set the logging level (defaults to "info")
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub debug_level: LogLevel,
}
