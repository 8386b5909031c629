//! Application orchestrator.
//! Merges config and CLI flags, initializes logging, installs the signal
//! handler, resolves the request (direct, interactive or menu mode), then
//! runs the pipeline and renders per-file outcomes.

use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result, bail};
use clap::CommandFactory;
use tracing::{debug, error, info};

use file_mover::cli::Args;
use file_mover::config::{self, CONFIG_ENV, Config, validate_request};
use file_mover::fs_ops::Outcome;
use file_mover::output as out;
use file_mover::pipeline::{self, Request};
use file_mover::prompt::{self, MenuChoice};
use file_mover::shutdown;

use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before any other setup.
    if args.print_config {
        print_config_location();
        return Ok(());
    }

    // Config file first, CLI flags win.
    let mut cfg = Config::default();
    config::load_config(&mut cfg);
    args.apply_overrides(&mut cfg);

    let guard_opt = init_tracing(cfg.log_level, cfg.log_file.as_deref(), args.json)
        .context("failed to initialize logging")?;

    // The guard is dropped in the signal handler so file logs flush on Ctrl-C.
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; stopping after the current file...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take();
            }
        })
        .context("failed to install signal handler")?;
    }

    debug!(?args, "Starting file_mover");

    let result = (|| -> Result<()> {
        let Some(request) = build_request(&args, &cfg)? else {
            return Ok(()); // user quit the menu
        };
        validate_request(&request)?;
        execute(&request, &cfg)
    })();

    // Ensure logs are flushed before exit.
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn print_config_location() {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {explicit}"));
        out::print_info("To use the default location, unset the variable.");
        return;
    }
    match config::default_config_path() {
        Some(p) => {
            out::print_info(&format!("Default file_mover config path:\n  {}", p.display()));
            if p.exists() {
                out::print_info("A config file exists at that location.");
            } else {
                out::print_info("No config file exists there yet; a template is written on first run.");
            }
        }
        None => out::print_error("Could not determine a config path for this platform."),
    }
}

/// Resolve the request per invocation mode. `None` means the user chose to
/// quit without running anything.
fn build_request(args: &Args, cfg: &Config) -> Result<Option<Request>> {
    if args.interactive {
        let stdin = io::stdin();
        return Ok(Some(prompt::prompt_request(
            &mut stdin.lock(),
            &mut io::stdout(),
            cfg,
        )?));
    }

    match (&args.source, &args.pattern, &args.target) {
        (Some(source), Some(pattern), Some(target)) => Ok(Some(Request {
            source: source.clone(),
            pattern: pattern.clone(),
            target: target.clone(),
        })),
        _ if args.is_bare() => menu_loop(cfg),
        _ => bail!(
            "incorrect number of arguments: direct mode needs SOURCE, PATTERN and TARGET \
             (see --help, or use -i for interactive mode)"
        ),
    }
}

fn menu_loop(cfg: &Config) -> Result<Option<Request>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    loop {
        match prompt::mode_menu(&mut input, &mut output)? {
            MenuChoice::Interactive => {
                return Ok(Some(prompt::prompt_request(&mut input, &mut output, cfg)?));
            }
            MenuChoice::Help => {
                Args::command().print_help()?;
                println!();
            }
            MenuChoice::Quit => {
                println!("Goodbye!");
                return Ok(None);
            }
        }
    }
}

fn execute(request: &Request, cfg: &Config) -> Result<()> {
    let reports = match pipeline::run(request, cfg.dry_run) {
        Ok(reports) => reports,
        Err(e) => {
            error!(code = e.code(), error = %e, "Run terminated");
            return Err(e.into());
        }
    };

    let (mut moved, mut skipped, mut failed) = (0usize, 0usize, 0usize);
    for report in &reports {
        out::print_outcome(report, cfg.dry_run);
        match report.outcome {
            Outcome::Moved => moved += 1,
            Outcome::SkippedExists => skipped += 1,
            Outcome::Failed(_) => failed += 1,
        }
    }

    info!(moved, skipped, failed, "Batch finished");
    out::print_info(&format!("{moved} moved, {skipped} skipped, {failed} failed"));
    if failed > 0 {
        bail!("{failed} file(s) failed to relocate");
    }
    Ok(())
}
