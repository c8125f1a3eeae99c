//! Colored user-facing printing: batch summaries, config hints, the
//! keep-or-undo prompt and the per-file failure table. Colors are applied
//! only when stdout is a TTY. Log records go through `tracing`, not here.

use owo_colors::OwoColorize;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

/// Green confirmation for a completed (or undone) batch.
pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Plain line with no prefix or color. Used for output that may be scripted
/// against: the current/attempted/reason failure table, the JSON report and
/// the confirmation prompt.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
