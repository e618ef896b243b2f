//! `colloquy`: play, transcribe, or check a dialogue story.

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use cq_tui::config::TuiConfig;
use cq_tui::logging::{self, LogTarget};

#[derive(Parser)]
#[command(
    name = "colloquy",
    about = "Play branching dialogue stories in the terminal",
    version
)]
struct Cli {
    /// TOML settings file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play a story interactively
    Play {
        /// Story file (.json)
        story: PathBuf,

        /// Write logs to this file
        #[arg(long)]
        log: Option<PathBuf>,

        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print a transcript, answering choices from --choose
    Run {
        /// Story file (.json)
        story: PathBuf,

        /// 0-based answer for each choice point, in order
        #[arg(long = "choose")]
        choose: Vec<usize>,

        #[command(flatten)]
        overrides: Overrides,
    },
    /// Validate a story and print its size
    Check {
        /// Story file (.json)
        story: PathBuf,
    },
}

#[derive(Args)]
struct Overrides {
    /// Number of choice slots
    #[arg(long)]
    slots: Option<usize>,

    /// Cooldown before the dialogue closes, in milliseconds
    #[arg(long)]
    exit_delay_ms: Option<u64>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = match &cli.config {
        Some(path) => TuiConfig::load(path)?,
        None => TuiConfig::default(),
    };

    match cli.command {
        Command::Play {
            story,
            log,
            overrides,
        } => {
            logging::init(log.as_deref().map_or(LogTarget::Off, LogTarget::File))?;
            let config = overrides.apply(config)?;
            let source = read_story(&story)?;
            let title = story
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Colloquy".to_string());
            let app = cq_tui::app::PlayApp::new(source, title, &config)?;
            cq_tui::terminal::run(app, config.tick_rate())
        }
        Command::Run {
            story,
            choose,
            overrides,
        } => {
            logging::init(LogTarget::Stderr)?;
            let config = overrides.apply(config)?;
            let source = read_story(&story)?;
            let mut stdout = std::io::stdout().lock();
            cq_tui::transcript::run(&source, &choose, &config, &mut stdout)
        }
        Command::Check { story } => {
            logging::init(LogTarget::Stderr)?;
            let source = read_story(&story)?;
            let summary = cq_tui::transcript::check(&source)
                .map_err(|e| format!("{}: {e}", story.display()))?;
            println!("{}: {summary}", story.display());
            println!("ok");
            Ok(())
        }
    }
}

impl Overrides {
    fn apply(self, mut config: TuiConfig) -> Result<TuiConfig, String> {
        if let Some(slots) = self.slots {
            config.slots = slots;
        }
        if let Some(ms) = self.exit_delay_ms {
            config.exit_delay_ms = ms;
        }
        config.validate()?;
        Ok(config)
    }
}

fn read_story(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}
