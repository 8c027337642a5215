use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use music_export::{
    cli::{self, ScanError},
    config,
    config::Config,
    error, logging, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Without a command the interactive menu is started
    #[clap(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Export your Apple Music library without the menu
    AppleMusic(AppleMusicOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AppleMusicOptions {
    /// Directory for the export files (overrides OUTPUT_DIR)
    #[clap(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn main() {
    if let Err(e) = config::load_env() {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let config = Config::from_env();

    let guard = match cli.command {
        Some(Command::Completions(_)) => None,
        _ => match logging::init(&config.log_dir) {
            Ok(guard) => Some(guard),
            Err(e) => {
                warning!(
                    "Cannot open log file in {}. Err: {}",
                    config.log_dir.display(),
                    e
                );
                None
            }
        },
    };

    match cli.command {
        None => {
            if let Err(e) = cli::run_menu(&config) {
                drop(guard);
                match e.downcast_ref::<ScanError>() {
                    Some(scan) => error!("{}", scan),
                    None => error!("Terminal error: {}", e),
                }
            }
        }
        Some(Command::AppleMusic(opt)) => {
            let config = config.with_output_dir(opt.output_dir);
            match cli::scan_apple_music(&config) {
                Ok(_) => {}
                Err(e @ ScanError::Export { .. }) => {
                    drop(guard);
                    error!("{}", e);
                }
                Err(_) => {
                    drop(guard);
                    std::process::exit(1);
                }
            }
        }
        Some(Command::Completions(opt)) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
