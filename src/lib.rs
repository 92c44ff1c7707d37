// src/lib.rs

pub mod cli;
pub mod config;
pub mod detect;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod monitor;
pub mod template;
pub mod types;

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::RunConfig;
use crate::detect::WatchTarget;
use crate::errors::{MonrunError, Result};
use crate::exec::ShellRunner;
use crate::fs::{FileSystem, RealFileSystem};
use crate::monitor::{Monitor, MonitorOptions, TargetSet};
use crate::template::CommandTemplate;
use crate::types::Signal;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (config file + CLI flags)
/// - one watch target per file
/// - command template expansion
/// - working directory change
/// - the polling loop, stopped by Ctrl-C
pub async fn run(args: CliArgs) -> Result<()> {
    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let cfg = config::resolve_checked(fs.as_ref(), &args)?;

    let (targets, template) = prepare(fs, &cfg)?;

    if args.dry_run {
        print_dry_run(&cfg, &targets, &template);
        return Ok(());
    }

    if cfg.change_workdir {
        change_workdir(template_source(&targets))?;
    }
    info!(
        "using {:?} as working dir",
        std::env::current_dir().unwrap_or_default()
    );

    let options = MonitorOptions {
        interval: cfg.interval,
        run_before: cfg.run_before,
    };
    let monitor = Monitor::new(targets, template.command(), ShellRunner::new(), options);
    monitor.run(shutdown_signal()).await
}

/// Build every watch target and resolve the command template.
///
/// All startup validation that touches the filesystem happens here, before
/// anything runs: each path must be an existing regular file. Paths are made
/// absolute so `@file` stays valid after the working directory change, but
/// symlinks are kept as named.
pub fn prepare(
    fs: Arc<dyn FileSystem>,
    cfg: &RunConfig,
) -> Result<(TargetSet, CommandTemplate)> {
    if cfg.policy.contains(Signal::Checksum) {
        info!("calculating checksum for the first time");
    }

    let mut targets = Vec::with_capacity(cfg.files.len());
    for file in &cfg.files {
        if !fs.is_file(file) {
            return Err(MonrunError::NotAFile(file.clone()));
        }
        let path = fs.absolute(file).map_err(|source| MonrunError::FileAccess {
            path: file.clone(),
            source,
        })?;
        targets.push(WatchTarget::new(Arc::clone(&fs), path, cfg.policy.clone())?);
    }
    let targets = TargetSet::new(targets);

    let template = CommandTemplate::for_file(cfg.command.clone(), template_source(&targets));
    debug!(raw = %template.raw(), resolved = %template.command(), "expanded command template");

    Ok((targets, template))
}

/// The first watched file; configuration guarantees there is one.
fn template_source(targets: &TargetSet) -> &Path {
    targets.targets()[0].path()
}

fn change_workdir(file: &Path) -> Result<()> {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::env::set_current_dir(dir)?;
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed the loop simply
/// runs until killed.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

/// Simple dry-run output: print files, policy and the resolved command.
fn print_dry_run(cfg: &RunConfig, targets: &TargetSet, template: &CommandTemplate) {
    println!("monrun dry-run");
    println!("  policy = {}", cfg.policy);
    println!("  interval_ms = {}", cfg.interval.as_millis());
    println!("  run_before = {}", cfg.run_before);
    println!("  change_workdir = {}", cfg.change_workdir);
    println!();

    println!("files ({}):", targets.len());
    for target in targets.targets() {
        println!("  - {}", target.path().display());
    }
    println!();

    println!("command:");
    println!("  raw:      {}", template.raw());
    println!("  resolved: {}", template.command());

    debug!("dry-run complete (no execution)");
}
