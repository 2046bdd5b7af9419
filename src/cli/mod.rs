//! CLI module for the NutriFlow navigation driver.
//!
//! - `shell`: interactive driver on the async runtime (default)
//! - `script`: deterministic runs on a virtual clock
//! - `screens`, `completions`, `config`, `logs`: informational commands

pub mod command;
pub mod completions;
pub mod script;
pub mod shell;

use crate::config::Config;
use crate::state::Screen;
use crate::utils::format_path_for_display;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

/// Navigation and transition controller for the NutriFlow client
#[derive(Parser, Debug)]
#[command(
    name = "nutriflow",
    version,
    about = "Navigation and transition controller for the NutriFlow client",
    long_about = None,
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use this config file instead of ~/.config/nutriflow/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Drive the controller interactively (default)
    Shell,
    /// Run a command script on a virtual clock
    Script {
        /// Script file, one command per line
        file: PathBuf,
    },
    /// List every screen with its classification
    Screens,
    /// Generate shell completions
    Completions {
        /// Target shell (detected from $SHELL when omitted)
        shell: Option<Shell>,
    },
    /// Configuration file location
    Config,
    /// Shows logs location
    Logs,
}

impl Cli {
    /// Config file this invocation should use.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .as_deref()
            .map(|p| crate::utils::expand_path(&p.to_string_lossy()))
            .unwrap_or_else(crate::utils::get_config_path)
    }

    /// Execute the CLI command
    pub fn execute(self, config: &Config) -> Result<()> {
        let config_path = self.config_path();
        match self.command {
            Some(Commands::Shell) | None => shell::run(config.controller_options()),
            Some(Commands::Script { file }) => Self::cmd_script(config, &file),
            Some(Commands::Screens) => Self::cmd_screens(),
            Some(Commands::Completions { shell }) => {
                completions::generate(shell, &mut std::io::stdout())
            }
            Some(Commands::Config) => {
                println!("{}", config_path.display());
                Ok(())
            }
            Some(Commands::Logs) => {
                let log_file = crate::utils::get_log_dir().join("nutriflow.log");
                println!("{}", log_file.display());
                Ok(())
            }
        }
    }

    fn cmd_script(config: &Config, file: &std::path::Path) -> Result<()> {
        info!("CLI: running script {:?}", file);
        let reader = std::fs::File::open(file)
            .with_context(|| format!("Failed to open script: {}", format_path_for_display(file)))?;

        let mut runner = script::ScriptRunner::new(config.controller_options());
        let mut out = std::io::stdout().lock();
        let report = runner.run(BufReader::new(reader), &mut out)?;
        drop(out);

        if report.rejected == 0 {
            print_success(&format!(
                "{} lines, final screen {}",
                report.lines,
                runner.controller().active()
            ));
        } else {
            print_error(&format!(
                "{} of {} lines rejected, final screen {}",
                report.rejected,
                report.lines,
                runner.controller().active()
            ));
        }
        Ok(())
    }

    fn cmd_screens() -> Result<()> {
        let mut category = "";
        for screen in Screen::ALL {
            if screen.category() != category {
                category = screen.category();
                println!("\n{}:", category);
            }
            let mut tags = Vec::new();
            if screen.is_main() {
                tags.push("main");
            }
            if screen.is_full_width() {
                tags.push("full-width");
            }
            println!("  {:<26} {}", screen.as_str(), tags.join(", "));
        }
        Ok(())
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Print a success message with a checkmark prefix.
pub fn print_success(msg: &str) {
    println!("\u{2713} {}", msg);
}

/// Print an error message with an X prefix to stderr.
pub fn print_error(msg: &str) {
    eprintln!("\u{2717} {}", msg);
}

/// Print an info message with an info sign prefix.
pub fn print_info(msg: &str) {
    println!("\u{2139}\u{FE0F} {}", msg);
}
