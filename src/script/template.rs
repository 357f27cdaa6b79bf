use crate::script::planner::{BRACKET_PLACEHOLDER, DEPS_MARKER, ESCAPED_BRACKET};
use crate::script::platform::Platform;
use anyhow::Result;
use regex::{Captures, Regex};
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::LazyLock;

static PATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{([.~]/[^}]*)\}").unwrap());
static ARGS_FILE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@\[([^\]]*)\]").unwrap());

/// Turns the portable markers of a template into text for one platform.
///
/// Stages run in a fixed order: `{{deps}}`, `{./...}`/`{~/...}` paths,
/// the `{/}` `{:}` `{~}` markers, `{;}`, and finally `@[...]` args files.
pub struct Substitutions<'a> {
    platform: &'a Platform,
    classpath: &'a [PathBuf],
}

impl<'a> Substitutions<'a> {
    pub fn new(platform: &'a Platform, classpath: &'a [PathBuf]) -> Self {
        Self { platform, classpath }
    }

    /// Dry run: `@[...]` contents are inlined, no file is ever created.
    pub fn inline(&self, command: &str) -> String {
        let text = self.substitute_markers(command);
        match replace_args_files(&text, |content| Ok::<_, Infallible>(content)) {
            Ok(result) => result,
            Err(never) => match never {},
        }
    }

    /// Real run: every `@[...]` content goes through `create` and the
    /// construct becomes `@<path>`.
    pub fn render<F>(&self, command: &str, mut create: F) -> Result<String>
    where
        F: FnMut(&str) -> Result<PathBuf>,
    {
        let text = self.substitute_markers(command);
        replace_args_files(&text, |content| -> Result<String> {
            let path = create(&content)?;
            Ok(format!("@{}", path.display()))
        })
    }

    fn substitute_markers(&self, command: &str) -> String {
        let platform = self.platform;

        // 1. Classpath
        let mut result = self.substitute_deps(command);

        // 2. {./...} and {~/...}, possibly several joined by ':'
        result = PATH_RE
            .replace_all(&result, |caps: &Captures| self.native_paths(&caps[1]))
            .into_owned();

        // 3. Separators and home
        let home = if platform.is_windows() {
            platform.home_str()
        } else {
            "~".to_string()
        };
        result = result
            .replace("{/}", platform.file_separator())
            .replace("{:}", platform.path_separator())
            .replace("{~}", &home);

        // 4. Multi-command separator
        result.replace("{;}", platform.command_separator())
    }

    fn substitute_deps(&self, command: &str) -> String {
        if !command.contains(DEPS_MARKER) {
            return command.to_string();
        }
        command.replace(DEPS_MARKER, &join_classpath(self.classpath, self.platform))
    }

    fn native_paths(&self, paths: &str) -> String {
        let platform = self.platform;
        if !platform.is_windows() {
            // Already POSIX
            return paths.to_string();
        }

        split_path_list(paths)
            .into_iter()
            .map(|part| {
                if let Some(rest) = part.strip_prefix("~/") {
                    native_join(&platform.home_str(), rest, platform)
                } else {
                    let rest = part.strip_prefix("./").unwrap_or(part);
                    if rest.is_empty() {
                        ".".to_string()
                    } else {
                        rest.replace('/', platform.file_separator())
                    }
                }
            })
            .collect::<Vec<_>>()
            .join(platform.path_separator())
    }
}

/// Splits a `:` separated list, keeping drive prefixes such as `C:\` whole.
///
/// A `:` is part of a drive when a single ASCII letter opens the entry (or
/// follows a `;` of an already joined classpath) and a slash comes next.
fn split_path_list(paths: &str) -> Vec<&str> {
    let bytes = paths.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if b != b':' {
            continue;
        }
        let drive = i > start
            && bytes[i - 1].is_ascii_alphabetic()
            && (i - 1 == start || bytes[i - 2] == b';')
            && matches!(bytes.get(i + 1), Some(b'\\') | Some(b'/'));
        if !drive {
            parts.push(&paths[start..i]);
            start = i + 1;
        }
    }
    parts.push(&paths[start..]);
    parts
}

fn native_join(base: &str, rest: &str, platform: &Platform) -> String {
    let sep = platform.file_separator();
    let rest = rest.replace('/', sep);
    if rest.is_empty() {
        base.to_string()
    } else if base.ends_with(sep) {
        format!("{}{}", base, rest)
    } else {
        format!("{}{}{}", base, sep, rest)
    }
}

fn replace_args_files<E, F>(command: &str, mut replace: F) -> Result<String, E>
where
    F: FnMut(String) -> Result<String, E>,
{
    // {]} must not end an @[...] early
    let protected = command.replace(ESCAPED_BRACKET, &BRACKET_PLACEHOLDER.to_string());

    let mut result = String::with_capacity(protected.len());
    let mut last = 0;
    for caps in ARGS_FILE_RE.captures_iter(&protected) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let content = caps[1].trim().replace(BRACKET_PLACEHOLDER, "]");
        result.push_str(&protected[last..whole.start()]);
        result.push_str(&replace(content)?);
        last = whole.end();
    }
    result.push_str(&protected[last..]);

    Ok(result.replace(BRACKET_PLACEHOLDER, ESCAPED_BRACKET))
}

/// Length of a processed command as the OS counts it.
pub fn command_length(command: &str) -> usize {
    command.chars().count()
}

/// Joins a classpath the way `{{deps}}` renders it, used for reporting.
pub fn join_classpath(classpath: &[PathBuf], platform: &Platform) -> String {
    classpath
        .iter()
        .map(|p| p.to_string_lossy())
        .collect::<Vec<_>>()
        .join(platform.path_separator())
}
