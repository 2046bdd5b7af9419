//! Completions command for generating shell completions.

use crate::cli::Cli;
use anyhow::bail;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io::Write;

/// Generate command-line completions into `out`.
pub fn generate<W: Write>(shell: Option<Shell>, out: &mut W) -> anyhow::Result<()> {
    let Some(shell) = shell.or_else(Shell::from_env) else {
        bail!("Could not automatically detect shell");
    };

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);

    Ok(())
}
