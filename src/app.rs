//! Application orchestrator.
//! Loads/merges config, initializes logging, installs the signal handler,
//! assembles the candidate list, and drives a rename session.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use tracing::{debug, error, info};

use batch_rename::config::{config_file_path, ensure_default_config_exists, load_config_from_xml, Config, CONFIG_ENV};
use batch_rename::output as out;
use batch_rename::{shutdown, RenameReport, Session, SessionOptions};

use batch_rename::cli::Args;
use crate::logging::init_tracing;

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    // Handle --print-config before logging init
    if args.print_config {
        if let Ok(cfg_env) = std::env::var(CONFIG_ENV) {
            out::print_info(&format!("Using {CONFIG_ENV} (explicit):\n  {cfg_env}\n"));
            out::print_info(&format!("To override, unset {CONFIG_ENV} or set it to another file."));
            return Ok(());
        }
        match config_file_path() {
            Some(p) => {
                out::print_info(&format!("Default batch_rename config path:\n  {}\n", p.display()));
                if p.exists() {
                    out::print_info("A config file already exists at that location.");
                } else {
                    out::print_info("No config file exists there yet. Run without --print-config to create a template.");
                }
            }
            None => {
                out::print_error("Could not determine a default config path.");
            }
        }
        return Ok(());
    }

    // Create template config if none exists (before logging init)
    if let Some(path) = ensure_default_config_exists() {
        out::print_success(&format!(
            "A template batch_rename config was written to: {}",
            path.display()
        ));
        out::print_info(
            "Edit it to set case sensitivity, log level and per-character substitutes, then re-run this command.",
        );
        return Ok(());
    }

    // Build config (may read XML). CLI args override config values.
    let mut cfg = Config::default();
    load_config_from_xml(&mut cfg);
    args.apply_overrides(&mut cfg);

    // Initialize logging and capture the guard so we can drop it on signal
    let guard_opt = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .map_err(|e| {
            out::print_error(&format!("Failed to initialize logging: {}", e));
            e
        })?;

    // Guard needs to be dropped on SIGINT to flush logs
    let guard_slot = Arc::new(Mutex::new(guard_opt));
    {
        let guard_slot = Arc::clone(&guard_slot);
        ctrlc::set_handler(move || {
            shutdown::request();
            out::print_warn("Received interrupt; finishing the current rename then stopping...");
            if let Ok(mut g) = guard_slot.lock() {
                let _ = g.take(); // drop guard here to flush tracing_appender
            }
        })
        .expect("failed to install signal handler");
    }

    debug!("Starting batch_rename: {:?}", args);

    let result = run_batch(&args, &cfg);

    // Ensure logs are flushed before exit
    if let Ok(mut g) = guard_slot.lock() {
        let _ = g.take();
    }

    result
}

fn run_batch(args: &Args, cfg: &Config) -> Result<()> {
    let directory = args
        .directory
        .canonicalize()
        .with_context(|| format!("cannot open directory '{}'", args.directory.display()))?;

    let candidates = assemble_candidates(args, &directory)?;
    if candidates.is_empty() {
        out::print_info("No files match; nothing to rename.");
        return Ok(());
    }

    let mut session = Session::new(
        &directory,
        SessionOptions {
            substitutions: cfg.substitutions.clone(),
            case_mode: cfg.case_mode,
            dry_run: cfg.dry_run,
        },
    );

    let report = match session.rename(&candidates) {
        Ok(r) => r,
        Err(e) => {
            error!(code = e.code(), error = %e, "batch rejected before execution");
            out::print_error(&format!("Batch rejected: {e}"));
            return Err(e.into());
        }
    };

    print_report(&report, cfg.dry_run, args.json);

    if args.confirm && !cfg.dry_run && report.renamed > 0 && !ask_keep_changes()? {
        let undo = session
            .undo_last_batch()
            .context("failed to undo the batch")?;
        print_report(&undo, false, args.json);
        out::print_success(&format!("Undid {} rename(s)", undo.renamed));
        return Ok(());
    }

    if report.cancelled {
        bail!("batch cancelled after {} rename(s)", report.renamed);
    }
    if !report.failures.is_empty() {
        bail!(
            "{} of {} rename(s) failed",
            report.failures.len(),
            report.failures.len() + report.renamed
        );
    }
    Ok(())
}

/// Build the (current name, candidate name) list from the selected mode.
fn assemble_candidates(args: &Args, directory: &Path) -> Result<Vec<(String, String)>> {
    if let Some(plan_path) = &args.plan {
        return parse_plan_file(plan_path);
    }
    if let Some(find) = &args.find {
        if find.is_empty() {
            bail!("--find must not be empty");
        }
        let replace = args.replace.as_deref().unwrap_or("");
        let mut names: Vec<String> = fs::read_dir(directory)
            .with_context(|| format!("cannot read directory '{}'", directory.display()))?
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| name.contains(find.as_str()))
            .collect();
        names.sort();
        return Ok(names
            .into_iter()
            .map(|name| {
                let candidate = name.replace(find.as_str(), replace);
                (name, candidate)
            })
            .collect());
    }
    bail!("specify either --plan FILE or --find TEXT [--replace TEXT]");
}

/// Parse `current<TAB>new` lines. Blank lines and '#' comments are skipped.
fn parse_plan_file(path: &Path) -> Result<Vec<(String, String)>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("cannot read plan file '{}'", path.display()))?;
    let mut out = Vec::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        let (current, target) = line.split_once('\t').with_context(|| {
            format!(
                "{}:{}: expected `current<TAB>new`",
                path.display(),
                lineno + 1
            )
        })?;
        if current.is_empty() {
            bail!("{}:{}: current name is empty", path.display(), lineno + 1);
        }
        out.push((current.to_string(), target.to_string()));
    }
    Ok(out)
}

fn print_report(report: &RenameReport, dry_run: bool, json: bool) {
    if json {
        let payload = serde_json::json!({
            "renamed": report.renamed,
            "cancelled": report.cancelled,
            "dry_run": dry_run,
            "failures": report.failures,
        });
        out::print_user(&payload.to_string());
        return;
    }

    if dry_run {
        out::print_info(&format!("Dry-run: {} rename(s) would be performed", report.renamed));
    } else {
        info!(renamed = report.renamed, failed = report.failures.len(), "batch finished");
        out::print_success(&format!("Renamed {} file(s)", report.renamed));
    }
    if !report.failures.is_empty() {
        out::print_warn(&format!(
            "Batch partially completed; {} file(s) could not be renamed:",
            report.failures.len()
        ));
        for failure in &report.failures {
            out::print_user(&format!(
                "  {}\t{}\t{}",
                failure.current_name, failure.attempted_name, failure.reason
            ));
        }
    }
    if report.cancelled {
        out::print_warn("Batch was cancelled before completing; already-renamed files were kept.");
    }
}

fn ask_keep_changes() -> Result<bool> {
    out::print_user("Keep these changes? [Y/n] ");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read confirmation")?;
    let answer = line.trim().to_ascii_lowercase();
    Ok(!matches!(answer.as_str(), "n" | "no"))
}
