use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::cli::menu::pause;

pub fn scan_spotify<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    writeln!(output, "\n{}", "Spotify Library Scanner".cyan())?;
    writeln!(output, "{}", "Not implemented yet...".yellow())?;
    pause(input, output, "Press Enter to continue...")
}
