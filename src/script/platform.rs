use std::env;
use std::path::PathBuf;

/// Family of the host OS, as far as separators and shells go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsKind {
    Windows,
    Posix,
}

/// Host capabilities the template processor and executor depend on.
///
/// Injected explicitly so rendering for Windows can be exercised on any host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub kind: OsKind,
    pub home: PathBuf,
}

impl Platform {
    pub fn new(kind: OsKind, home: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            home: home.into(),
        }
    }

    pub fn posix(home: impl Into<PathBuf>) -> Self {
        Self::new(OsKind::Posix, home)
    }

    pub fn windows(home: impl Into<PathBuf>) -> Self {
        Self::new(OsKind::Windows, home)
    }

    /// Detects the platform the tool is running on.
    pub fn current() -> Self {
        let kind = if cfg!(windows) { OsKind::Windows } else { OsKind::Posix };
        let home = env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("~"));
        Self { kind, home }
    }

    pub fn is_windows(&self) -> bool {
        self.kind == OsKind::Windows
    }

    pub fn file_separator(&self) -> &'static str {
        if self.is_windows() { "\\" } else { "/" }
    }

    pub fn path_separator(&self) -> &'static str {
        if self.is_windows() { ";" } else { ":" }
    }

    pub fn command_separator(&self) -> &'static str {
        if self.is_windows() { "&" } else { ";" }
    }

    pub fn home_str(&self) -> String {
        self.home.to_string_lossy().into_owned()
    }

    /// Longest processed command (in characters) passed inline before
    /// args files are used.
    pub fn command_length_limit(&self) -> usize {
        if self.is_windows() { 8000 } else { 32000 }
    }

    /// Shell program and the flag that makes it run a single command string.
    pub fn shell(&self) -> (&'static str, &'static str) {
        if self.is_windows() {
            ("cmd.exe", "/c")
        } else {
            ("/bin/sh", "-c")
        }
    }

    pub fn is_absolute(&self, path: &str) -> bool {
        if path.starts_with('/') {
            return true;
        }
        if self.is_windows() {
            let bytes = path.as_bytes();
            return path.starts_with('\\')
                || (bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':');
        }
        false
    }

    /// Non-empty name elements of a path, split on the separators this
    /// platform accepts.
    pub fn path_segments<'a>(&self, path: &'a str) -> Vec<&'a str> {
        let windows = self.is_windows();
        path.split(|c: char| c == '/' || (windows && c == '\\'))
            .filter(|s| !s.is_empty())
            .collect()
    }
}
