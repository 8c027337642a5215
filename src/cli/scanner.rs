use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::cli::menu::{pause, prompt};

pub const DEFAULT_SONG_LIST: &str = "data/songs.txt";

/// Asks for a local song list. Scanning it is not implemented yet.
pub fn scan_txt_file<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    writeln!(output, "\n{}", "Local TXT Scanner".cyan())?;

    let path = prompt(input, output, "Enter path to .txt file", Some(DEFAULT_SONG_LIST))?;

    writeln!(output, "\n{}", format!("Scanning file: {}", path).yellow())?;
    writeln!(output, "{}", "Not implemented yet...".yellow())?;
    pause(input, output, "Press Enter to continue...")
}
