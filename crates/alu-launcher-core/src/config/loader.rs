//! Environment variable loading.
//!
//! Keeps the primary → alias → default fallback chain in one place.
//! Only the structs in `schema` call these helpers.

use std::env;
use std::path::Path;

/// Load `<dir>/.env` into the process environment without overriding
/// variables that are already set. Runs at most once per process.
pub fn load_dotenv_from_dir(dir: &Path) {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let path = dir.join(".env");
        let Ok(content) = std::fs::read_to_string(&path) else {
            return;
        };
        let mut loaded = 0usize;
        for (key, value) in parse_dotenv(&content) {
            if env::var_os(&key).is_none() {
                env::set_var(&key, &value);
                loaded += 1;
            }
        }
        tracing::debug!(path = %path.display(), loaded, "Loaded .env");
    });
}

/// Parse `KEY=VALUE` lines. Blank lines and `#` comments are skipped, an
/// unquoted trailing `# comment` is stripped, and matching surrounding
/// quotes are removed.
pub fn parse_dotenv(content: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let mut value = value.trim();
        if let Some(hash_pos) = value.find('#') {
            let before_hash = value[..hash_pos].trim_end();
            if !before_hash.contains('"') && !before_hash.contains('\'') {
                value = before_hash;
            }
        }
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        if !key.is_empty() {
            pairs.push((key.to_string(), value.to_string()));
        }
    }
    pairs
}

/// Resolution helpers below take the variable source as a closure; the
/// typed configs pass `std::env::var`, tests pass a map.
pub(crate) fn lookup_raw<L>(lookup: &L, primary: &str, aliases: &[&str]) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup(primary).or_else(|| aliases.iter().find_map(|a| lookup(*a)))
}

pub(crate) fn lookup_or<L, F>(lookup: &L, primary: &str, aliases: &[&str], default: F) -> String
where
    L: Fn(&str) -> Option<String>,
    F: FnOnce() -> String,
{
    lookup_raw(lookup, primary, aliases)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(default)
}

pub(crate) fn lookup_optional<L>(lookup: &L, primary: &str, aliases: &[&str]) -> Option<String>
where
    L: Fn(&str) -> Option<String>,
{
    lookup_raw(lookup, primary, aliases).and_then(|s| {
        let s = s.trim().to_string();
        if s.is_empty() {
            None
        } else {
            Some(s)
        }
    })
}

pub(crate) fn lookup_bool<L>(lookup: &L, primary: &str, aliases: &[&str], default: bool) -> bool
where
    L: Fn(&str) -> Option<String>,
{
    match lookup_raw(lookup, primary, aliases).as_deref() {
        Some(s) => !matches!(
            s.trim().to_lowercase().as_str(),
            "0" | "false" | "no" | "off"
        ),
        None => default,
    }
}
