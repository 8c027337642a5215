use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::{
    Res,
    cli::{
        apple_music::{self, ScanError},
        scanner, search, spotify,
    },
    config::Config,
};

/// Result of checking one line of menu input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Choice(usize),
    Retry,
}

/// Accepts a plain decimal number between `0` and `max_option`.
///
/// Surrounding whitespace is ignored; signs, blanks and anything out of range
/// ask for another try.
pub fn validate(input: &str, max_option: usize) -> MenuInput {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return MenuInput::Retry;
    }

    match input.parse::<usize>() {
        Ok(choice) if choice <= max_option => MenuInput::Choice(choice),
        _ => MenuInput::Retry,
    }
}

/// Prompts until a valid option is entered.
///
/// End of input counts as `0`, the back/exit option.
pub fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    max_option: usize,
) -> io::Result<usize> {
    loop {
        write!(output, "{} ", "Enter choice:".green())?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(0);
        }

        match validate(&line, max_option) {
            MenuInput::Choice(choice) => return Ok(choice),
            MenuInput::Retry => writeln!(output, "{}", "Invalid choice! Try again.".red())?,
        }
    }
}

/// Asks for a line of text, falling back to `default` on an empty answer.
pub fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    default: Option<&str>,
) -> io::Result<String> {
    match default {
        Some(default) => write!(output, "{} ({}): ", label.green(), default)?,
        None => write!(output, "{}: ", label.green())?,
    }
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();

    Ok(match default {
        Some(default) if answer.is_empty() => default.to_string(),
        _ => answer.to_string(),
    })
}

/// Waits for the user to press Enter.
pub fn pause<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> io::Result<()> {
    write!(output, "\n{}", message)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(())
}

pub fn show_main_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output)?;
    writeln!(output, "{}", "🎵 Music Downloader CLI".cyan().bold())?;
    writeln!(output, "\n{}\n", "What do you want to do?".yellow())?;
    writeln!(output, "1) Scan music from streaming service")?;
    writeln!(output, "2) Scan local .txt file with songs")?;
    writeln!(output, "3) Direct search")?;
    writeln!(output, "0) Exit\n")
}

pub fn show_streaming_menu<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "\n{}\n", "Choose streaming service:".yellow())?;
    writeln!(output, "1) Apple Music")?;
    writeln!(output, "2) Spotify")?;
    writeln!(output, "0) Back\n")
}

/// Runs the interactive main menu until the user exits.
///
/// Stops early on a terminal error or when an export cannot be written.
pub fn run_menu(config: &Config) -> Res<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    loop {
        show_main_menu(&mut output)?;

        match read_choice(&mut input, &mut output, 3)? {
            1 => {
                show_streaming_menu(&mut output)?;
                match read_choice(&mut input, &mut output, 2)? {
                    1 => {
                        match apple_music::scan_apple_music(config) {
                            Ok(_) => {}
                            Err(e @ ScanError::Export { .. }) => return Err(e.into()),
                            // already reported, back to the menu
                            Err(e) => tracing::debug!("Apple Music scan ended early: {}", e),
                        }
                        pause(&mut input, &mut output, "Press Enter...")?;
                    }
                    2 => spotify::scan_spotify(&mut input, &mut output)?,
                    _ => {}
                }
            }
            2 => scanner::scan_txt_file(&mut input, &mut output)?,
            3 => search::direct_search(&mut input, &mut output)?,
            _ => {
                writeln!(output, "\nGoodbye! 👋")?;
                return Ok(());
            }
        }
    }
}
