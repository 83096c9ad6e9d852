//! The dependency set installed into the launcher environment.

use thiserror::Error;

/// Third-party packages the application imports. Versions are not pinned;
/// every launch re-applies them with upgrade semantics.
pub const DEFAULT_PACKAGES: &[&str] = &["pymem", "keyboard"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DependencyError {
    #[error("Empty package name")]
    EmptyName,

    #[error("Invalid package name '{0}' (expected letters, digits, '.', '_' or '-')")]
    InvalidName(String),
}

/// Ordered, de-duplicated list of package names handed to the installer.
///
/// Names compare case-insensitively with `_`, `-` and `.` treated alike, so
/// `PyMem` and `pymem` collapse to the first spelling given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencySet {
    packages: Vec<String>,
}

impl Default for DependencySet {
    fn default() -> Self {
        Self {
            packages: DEFAULT_PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl DependencySet {
    pub fn new<I, S>(names: I) -> Result<Self, DependencyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut packages: Vec<String> = Vec::new();
        let mut seen: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            validate_name(name)?;
            let key = normalize(name);
            if !seen.contains(&key) {
                seen.push(key);
                packages.push(name.to_string());
            }
        }
        Ok(Self { packages })
    }

    /// Parse a comma-separated list such as `pymem, keyboard`. Empty entries
    /// are ignored.
    pub fn parse_list(list: &str) -> Result<Self, DependencyError> {
        Self::new(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.packages
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

fn validate_name(name: &str) -> Result<(), DependencyError> {
    let mut chars = name.chars();
    match chars.next() {
        None => return Err(DependencyError::EmptyName),
        // A leading '-' would be read by pip as an option.
        Some(c) if !c.is_ascii_alphanumeric() => {
            return Err(DependencyError::InvalidName(name.to_string()))
        }
        Some(_) => {}
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')) {
        Ok(())
    } else {
        Err(DependencyError::InvalidName(name.to_string()))
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '_' | '.' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}
