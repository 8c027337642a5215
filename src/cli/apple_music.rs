use std::{fmt, path::PathBuf, time::Instant};

use colored::Colorize;

use crate::{
    apple_music::{FetchError, LibraryFetcher},
    config::{Config, DEVELOPER_TOKEN_VAR, USER_TOKEN_VAR},
    info,
    logging::LOG_FILE_NAME,
    management::{ExportError, ExportWriter, file_name},
    success, warning,
};

/// Why a scan did not end with two export files.
#[derive(Debug)]
pub enum ScanError {
    /// Nothing to export. Already reported on the console.
    Fetch(FetchError),
    /// The export files could not be written. The caller should stop the
    /// program after flushing the log.
    Export {
        output_dir: PathBuf,
        source: ExportError,
    },
}

impl From<FetchError> for ScanError {
    fn from(err: FetchError) -> Self {
        ScanError::Fetch(err)
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Fetch(e) => write!(f, "{}", e),
            ScanError::Export { output_dir, source } => write!(
                f,
                "Failed to write export to {}. Err: {}",
                output_dir.display(),
                source
            ),
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Fetch(e) => Some(e),
            ScanError::Export { source, .. } => Some(source),
        }
    }
}

/// Scans the Apple Music library and exports it.
///
/// Prints progress and the names of the written files. Returns the number of
/// exported songs, or why nothing was exported.
pub fn scan_apple_music(config: &Config) -> Result<usize, ScanError> {
    println!("{}\n", "🍎 Apple Music Library Scanner".cyan().bold());

    let start = Instant::now();

    if config.credentials().is_some() {
        success!("Tokens loaded");
    }

    let mut fetcher = LibraryFetcher::from_config(config);
    let songs = match fetcher.fetch() {
        Ok(songs) => songs,
        Err(FetchError::MissingCredentials) => {
            warning!("Tokens not found in .env");
            show_token_help();
            return Err(FetchError::MissingCredentials.into());
        }
        Err(e) => {
            warning!("Failed to scan library");
            warning!(
                "Check tokens in .env or see {}",
                config.log_dir.join(LOG_FILE_NAME).display()
            );
            return Err(e.into());
        }
    };

    let elapsed = start.elapsed();

    info!(
        "Writing {} songs to {}",
        songs.len(),
        config.output_dir.display()
    );

    let writer = ExportWriter::new(&config.output_dir);
    match writer.write(&songs) {
        Ok(Some(paths)) => {
            success!("TXT: {}", file_name(&paths.text));
            success!("JSON: {}", file_name(&paths.json));
        }
        Ok(None) => {}
        Err(source) => {
            return Err(ScanError::Export {
                output_dir: config.output_dir.clone(),
                source,
            });
        }
    }

    success!(
        "Scanned {} songs in {:.1}s",
        songs.len(),
        elapsed.as_secs_f64()
    );

    Ok(songs.len())
}

fn show_token_help() {
    println!("\n{}\n", "How to get tokens:".yellow());
    println!("{} Open {} in browser", "1.".cyan(), "https://music.apple.com".bold());
    println!("{} Press {} → {} tab", "2.".cyan(), "F12".bold(), "Network".bold());
    println!("{} Refresh page ({})", "3.".cyan(), "Ctrl+R".bold());
    println!("{} Find request to {}", "4.".cyan(), "amp-api.music.apple.com".bold());
    println!("{} Click it → {} tab", "5.".cyan(), "Headers".bold());
    println!("{} Copy from Request Headers:", "6.".cyan());
    println!("   • {}", "authorization: Bearer eyJ...".green());
    println!("   • {}", "media-user-token: Aqo...".green());
    println!();
    println!("{} Add to {} file:", "7.".cyan(), ".env".bold());
    println!("   {}", format!("{}=eyJ...", DEVELOPER_TOKEN_VAR).green());
    println!("   {}", format!("{}=Aqo...", USER_TOKEN_VAR).green());
    println!();
    println!("{}", "Tokens valid for ~6 months".dimmed());
}
