//! # CLI Module
//!
//! User-facing layer of the music export tool. It renders the interactive
//! menus, validates the numeric input and calls into the library fetcher and
//! export writer.
//!
//! ## Menus
//!
//! ```text
//! Main menu                      Streaming menu
//!   1) Scan streaming service  →   1) Apple Music
//!   2) Scan local .txt file        2) Spotify
//!   3) Direct search               0) Back
//!   0) Exit
//! ```
//!
//! Input is checked by the pure [`validate`] function; [`read_choice`] keeps
//! prompting until it gets a valid option. `0` always goes back or exits.
//!
//! ## Commands
//!
//! - [`scan_apple_music`] - fetches the library and writes the two export files
//! - [`scan_spotify`] - placeholder
//! - [`scan_txt_file`] - placeholder, asks for a path
//! - [`direct_search`] - placeholder, asks for a song name
//!
//! The placeholders take their reader and writer as arguments so the prompt
//! flow can be driven without a terminal.

mod apple_music;
mod menu;
mod scanner;
mod search;
mod spotify;

pub use apple_music::ScanError;
pub use apple_music::scan_apple_music;
pub use menu::MenuInput;
pub use menu::pause;
pub use menu::prompt;
pub use menu::read_choice;
pub use menu::run_menu;
pub use menu::show_main_menu;
pub use menu::show_streaming_menu;
pub use menu::validate;
pub use scanner::DEFAULT_SONG_LIST;
pub use scanner::scan_txt_file;
pub use search::direct_search;
pub use spotify::scan_spotify;
