//! XML configuration support.
//! - Loads settings from config.xml (quick_xml).
//! - Creates a commented template if missing (unless BATCH_RENAME_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; substitution validation
//!   happens when a session is built.
//! - Unknown XML fields fail the parse (serde deny_unknown_fields) and the
//!   file is ignored with a warning, so typos surface in the logs.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use tracing::{info, warn};

use crate::engine::{CaseMode, CharSubs};

use super::paths::{config_file_path, default_config_path, default_log_path, path_has_symlink_ancestor, CONFIG_ENV};
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    case_insensitive: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
    sub_backslash: Option<String>,
    sub_slash: Option<String>,
    sub_colon: Option<String>,
    sub_asterisk: Option<String>,
    sub_question_mark: Option<String>,
    sub_quote: Option<String>,
    sub_less_than: Option<String>,
    sub_greater_than: Option<String>,
    sub_pipe: Option<String>,
}

/// Read config from XML and fold it into `cfg`. The per-platform default
/// path is used unless BATCH_RENAME_CONFIG is set. Returns false if no file
/// existed or nothing useful was parsed.
pub fn load_config_from_xml(cfg: &mut Config) -> bool {
    let env_set = env::var_os(CONFIG_ENV).is_some();
    let cfg_path = match config_file_path() {
        Some(p) => p,
        None => return false,
    };

    // If missing: create a template (only when using the default path).
    if !cfg_path.exists() {
        if !env_set {
            let _ = create_template_config(&cfg_path);
        }
        return false;
    }

    let content = match fs::read_to_string(&cfg_path) {
        Ok(c) => c,
        Err(_) => return false,
    };
    let parsed: XmlConfig = match from_xml_str(&content) {
        Ok(x) => x,
        Err(e) => {
            warn!(
                "Failed to parse config at {}: {}; ignoring the file",
                cfg_path.display(),
                e
            );
            return false;
        }
    };

    if let Some(ci) = parsed.case_insensitive {
        cfg.case_mode = if ci {
            CaseMode::Insensitive
        } else {
            CaseMode::Sensitive
        };
    }
    if let Some(lvl) = parsed.log_level.as_deref().and_then(|s| s.trim().parse::<LogLevel>().ok()) {
        cfg.log_level = lvl;
    }
    if let Some(lf) = parsed.log_file.as_deref() {
        let trimmed = lf.trim();
        if !trimmed.is_empty() {
            cfg.log_file = Some(PathBuf::from(trimmed));
        }
    }

    apply_sub(&mut cfg.substitutions.backslash, parsed.sub_backslash);
    apply_sub(&mut cfg.substitutions.slash, parsed.sub_slash);
    apply_sub(&mut cfg.substitutions.colon, parsed.sub_colon);
    apply_sub(&mut cfg.substitutions.asterisk, parsed.sub_asterisk);
    apply_sub(&mut cfg.substitutions.question_mark, parsed.sub_question_mark);
    apply_sub(&mut cfg.substitutions.quote, parsed.sub_quote);
    apply_sub(&mut cfg.substitutions.less_than, parsed.sub_less_than);
    apply_sub(&mut cfg.substitutions.greater_than, parsed.sub_greater_than);
    apply_sub(&mut cfg.substitutions.pipe, parsed.sub_pipe);

    true
}

// Substitutes may legitimately be empty, so only a present tag overrides.
fn apply_sub(slot: &mut String, value: Option<String>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// Create default template config file and parent directory (best-effort
/// permissions). Refuses symlinked ancestors so the template cannot be
/// redirected elsewhere.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/batch_rename.log".into());
    let defaults = CharSubs::default();

    let content = format!(
        "<!--\n  batch_rename configuration (XML)\n\n  Fields:\n    case_insensitive  -> true treats names differing only in case as colliding (safe default)\n    log_level         -> quiet | normal | info | debug\n    log_file          -> path to log file (optional; stdout/stderr still used)\n    sub_*             -> replacement string for each character forbidden in file names;\n                         may be empty to strip the character entirely\n\n  Notes:\n    - CLI flags override XML values.\n    - Substitutes must not themselves contain forbidden characters.\n-->\n<config>\n  <case_insensitive>true</case_insensitive>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <sub_backslash>{}</sub_backslash>\n  <sub_slash>{}</sub_slash>\n  <sub_colon>{}</sub_colon>\n  <sub_asterisk>{}</sub_asterisk>\n  <sub_question_mark>{}</sub_question_mark>\n  <sub_quote>{}</sub_quote>\n  <sub_less_than>{}</sub_less_than>\n  <sub_greater_than>{}</sub_greater_than>\n  <sub_pipe>{}</sub_pipe>\n</config>\n",
        suggested_log,
        defaults.backslash,
        defaults.slash,
        defaults.colon,
        defaults.asterisk,
        defaults.question_mark,
        defaults.quote,
        defaults.less_than,
        defaults.greater_than,
        defaults.pipe,
    );

    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    info!("Created template config at {}", path.display());
    Ok(())
}

/// Create default config if BATCH_RENAME_CONFIG not set; return created path
/// so the CLI can inform the user.
pub fn ensure_default_config_exists() -> Option<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        return None;
    }
    let path = default_config_path()?;
    if path.exists() {
        return None;
    }
    create_template_config(&path).ok()?;
    Some(path)
}
