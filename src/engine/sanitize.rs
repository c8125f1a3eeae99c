//! Candidate-name sanitization.
//! Substitutes filesystem-forbidden characters with user-configured alternatives
//! and strips characters that are invalid at the end of a name.

use serde::{Deserialize, Serialize};

/// Characters that cannot appear in a file name on the most restrictive
/// supported filesystem (NTFS/FAT family). Sanitizing against the full set
/// keeps renamed files portable across platforms.
pub const FORBIDDEN_CHARS: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Per-character substitute strings used when a forbidden character appears
/// in a candidate name. Each field is independently configurable; the
/// defaults are fixed constants chosen to keep names readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharSubs {
    pub backslash: String,
    pub slash: String,
    pub colon: String,
    pub asterisk: String,
    pub question_mark: String,
    pub quote: String,
    pub less_than: String,
    pub greater_than: String,
    pub pipe: String,
}

impl Default for CharSubs {
    fn default() -> Self {
        Self {
            backslash: "-".into(),
            slash: "-".into(),
            colon: " -".into(),
            asterisk: "-".into(),
            question_mark: String::new(),
            quote: "''".into(),
            less_than: "(".into(),
            greater_than: ")".into(),
            pipe: "-".into(),
        }
    }
}

impl CharSubs {
    /// Substitute string for a forbidden character, or None if the character
    /// is allowed as-is.
    pub fn substitute(&self, ch: char) -> Option<&str> {
        match ch {
            '\\' => Some(&self.backslash),
            '/' => Some(&self.slash),
            ':' => Some(&self.colon),
            '*' => Some(&self.asterisk),
            '?' => Some(&self.question_mark),
            '"' => Some(&self.quote),
            '<' => Some(&self.less_than),
            '>' => Some(&self.greater_than),
            '|' => Some(&self.pipe),
            _ => None,
        }
    }

    /// Reject substitute strings that would re-introduce forbidden characters.
    /// Sanitization must be idempotent, which holds only when no substitute
    /// contains a member of [`FORBIDDEN_CHARS`].
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("backslash", &self.backslash),
            ("slash", &self.slash),
            ("colon", &self.colon),
            ("asterisk", &self.asterisk),
            ("question_mark", &self.question_mark),
            ("quote", &self.quote),
            ("less_than", &self.less_than),
            ("greater_than", &self.greater_than),
            ("pipe", &self.pipe),
        ];
        for (name, value) in fields {
            if value.chars().any(|c| FORBIDDEN_CHARS.contains(&c)) {
                return Err(format!(
                    "substitute for '{name}' contains a forbidden character: {value:?}"
                ));
            }
        }
        Ok(())
    }

    /// Produce a filesystem-valid name from a raw candidate.
    ///
    /// Pure and deterministic. May return an empty string; callers surface
    /// that as a validation failure rather than inventing a default.
    pub fn sanitize(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for ch in raw.chars() {
            match self.substitute(ch) {
                Some(sub) => out.push_str(sub),
                None => out.push(ch),
            }
        }
        strip_invalid_trailing(&mut out);
        out
    }
}

/// Remove characters that are invalid at the end of a file name.
///
/// Trailing spaces and periods are silently dropped or rejected by the
/// Windows filesystem APIs, so names carrying them would fail or end up
/// different from what was requested.
pub fn strip_invalid_trailing(name: &mut String) {
    while name.ends_with(' ') || name.ends_with('.') {
        name.pop();
    }
}
