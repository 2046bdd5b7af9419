//! Interactive line-oriented driver.
//!
//! Runs the controller on the async runtime in real time. Every snapshot
//! change, including the ones produced by deferred transition steps, is
//! echoed as a one-line summary.

use super::command::{parse_line, ShellCommand, HELP};
use super::{print_error, print_info};
use crate::controller::{ControllerOptions, NavigationController};
use crate::runtime;
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

pub fn run(options: ControllerOptions) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    rt.block_on(run_async(options))
}

async fn run_async(options: ControllerOptions) -> Result<()> {
    let (handle, task) = runtime::spawn(NavigationController::new(options));
    info!("interactive shell started");

    let mut changes = handle.subscribe();
    println!("{}", changes.borrow_and_update().summary());
    let watcher = tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            let summary = changes.borrow_and_update().summary();
            println!("{}", summary);
        }
    });

    print_info("Type 'help' for commands.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                print_error(&e.to_string());
                continue;
            }
        };
        match command {
            ShellCommand::Intent(intent) => {
                if let Err(e) = handle.dispatch(intent).await {
                    print_error(&e.to_string());
                }
            }
            ShellCommand::Wait(duration) => tokio::time::sleep(duration).await,
            ShellCommand::Show => {
                let snapshot = handle.snapshot().await?;
                let json = serde_json::to_string_pretty(&snapshot)
                    .context("Failed to serialize snapshot")?;
                println!("{}", json);
            }
            ShellCommand::Help => print!("{}", HELP),
            ShellCommand::Quit => break,
        }
    }

    handle.shutdown();
    let controller = task.await.context("Navigation task panicked")?;
    watcher.abort();
    info!("interactive shell stopped on {}", controller.active());
    Ok(())
}
