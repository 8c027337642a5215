//! Music Export CLI Library
//!
//! This library exports a user's Apple Music library to local files. It pages
//! through the user's saved songs with the web player's bearer and user tokens,
//! normalizes the track titles and writes a plain text line list plus a
//! structured JSON document with one shared timestamp.
//!
//! # Modules
//!
//! - `apple_music` - Library fetcher and HTTP page transport
//! - `cli` - Interactive menu and command implementations
//! - `config` - Configuration loading from environment variables and `.env` files
//! - `logging` - File logging setup and the injectable log sink
//! - `management` - Export file persistence
//! - `types` - Data structures and type definitions
//! - `utils` - Title cleaning and small conversion helpers
//!
//! # Example
//!
//! ```
//! use music_export::{apple_music::LibraryFetcher, config::Config, management::ExportWriter};
//!
//! fn main() -> music_export::Res<()> {
//!     let config = Config::from_env();
//!     let mut fetcher = LibraryFetcher::from_config(&config);
//!     let songs = fetcher.fetch()?;
//!     ExportWriter::new(&config.output_dir).write(&songs)?;
//!     Ok(())
//! }
//! ```

pub mod apple_music;
pub mod cli;
pub mod config;
pub mod logging;
pub mod management;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used where errors of different kinds meet, e.g. the interactive menu
/// which stops on terminal errors as well as on failed exports.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Writing {} songs to {}", count, dir.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Tokens loaded");
/// success!("Scanned {} songs", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for failures the application cannot recover from, such as an
/// export that cannot be written to disk. The process exits with code 1.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for expected failures that end the current action but not the
/// program, e.g. a scan that produced no songs.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
