use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::cli::menu::{pause, prompt};

/// Asks for a song name. Searching is not implemented yet.
pub fn direct_search<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<()> {
    writeln!(output, "\n{}", "Direct Search".cyan())?;

    let query = prompt(input, output, "Enter song name", None)?;

    writeln!(output, "\n{}", format!("Searching for: {}", query).yellow())?;
    writeln!(output, "{}", "Not implemented yet...".yellow())?;
    pause(input, output, "Press Enter to continue...")
}
