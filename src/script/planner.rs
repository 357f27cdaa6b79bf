use crate::script::ast::{Commands, Node, SeparatorKind};
use crate::script::parser::parse_commands;
use crate::script::platform::Platform;
use log::debug;
use regex::Regex;
use std::sync::LazyLock;

pub(crate) const DEPS_MARKER: &str = "{{deps}}";
pub(crate) const ESCAPED_BRACKET: &str = "{]}";
pub(crate) const BRACKET_PLACEHOLDER: char = '\u{7}';

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([/:;~]|\./.*|~/.*)\}|@\[.*\]").unwrap());

const ARGS_FILE_TOOLS: &[&str] = &["java", "javac", "javadoc", "javap", "jdeps", "jmod"];

/// True when the template already uses a portable marker. `{{deps}}` alone
/// does not count.
pub fn using_substitutions(template: &str) -> bool {
    let protected = template.replace(ESCAPED_BRACKET, &BRACKET_PLACEHOLDER.to_string());
    MARKER_RE.is_match(&protected)
}

/// Rewrites bare relative paths and classpaths of a template into portable
/// markers, and wraps `{{deps}}` arguments in `@[...]`.
///
/// Templates that already use markers, or that don't parse, come back as is.
pub fn suggest_substitutions(template: &str, platform: &Platform) -> String {
    if using_substitutions(template) {
        debug!("Template already uses markers, skipping planning");
        return template.to_string();
    }

    match parse_commands(template) {
        Ok(commands) => render_commands(commands, platform),
        Err(e) => {
            debug!("Template not planned ({}): {}", e, template);
            template.to_string()
        }
    }
}

fn render_commands(commands: Commands, platform: &Platform) -> String {
    let mut out = String::new();
    for node in commands.elements {
        match node {
            Node::Command { words } => out.push_str(&plan_command(words, platform)),
            Node::Group(inner) => {
                out.push('(');
                out.push_str(&render_commands(inner, platform));
                out.push(')');
            }
            Node::Separator(SeparatorKind::Sequence) => out.push_str(" {;} "),
            Node::Separator(kind) => {
                out.push(' ');
                out.push_str(kind.as_str());
                out.push(' ');
            }
        }
    }
    out
}

fn plan_command(mut words: Vec<String>, platform: &Platform) -> String {
    // 1. Paths and classpaths become {./...} markers
    for word in words.iter_mut() {
        let planned = suggest_classpath(word, platform).or_else(|| suggest_path(word, platform));
        if let Some(planned) = planned {
            *word = planned;
        }
    }

    // 2. Arguments holding the classpath become args-file candidates
    for (i, word) in words.iter_mut().enumerate() {
        if i == 0 {
            if let Some(stripped) = word.strip_prefix('@') {
                *word = stripped.to_string();
            } else if supports_args_files(word, platform) {
                debug!("'{}' accepts @argfiles", word);
            }
        } else if word.contains(DEPS_MARKER) {
            *word = format!("@[{}]", word.replace(']', ESCAPED_BRACKET));
        }
    }

    words.join(" ")
}

/// Whether the program is a JVM tool known to read `@file` arguments.
pub fn supports_args_files(program: &str, platform: &Platform) -> bool {
    let Some(name) = platform.path_segments(program).last().copied() else {
        return false;
    };
    let mut name = name.to_lowercase();
    for ext in [".exe", ".bat", ".cmd"] {
        if name.ends_with(ext) {
            name.truncate(name.len() - ext.len());
            break;
        }
    }
    ARGS_FILE_TOOLS.contains(&name.as_str())
}

fn starts_dotted(path: &str, platform: &Platform) -> bool {
    matches!(platform.path_segments(path).first(), Some(&".") | Some(&"~"))
}

fn suggest_path(word: &str, platform: &Platform) -> Option<String> {
    if platform.is_absolute(word) || platform.path_segments(word).len() < 2 {
        return None;
    }
    if starts_dotted(word, platform) {
        Some(format!("{{{}}}", word))
    } else {
        Some(format!("{{./{}}}", word))
    }
}

/// `Some` for a word that reads as a classpath. Only `{./...}` and `{~/...}`
/// markers get rendered later, so anything else comes back as written.
fn suggest_classpath(word: &str, platform: &Platform) -> Option<String> {
    let mut parts: Vec<&str> = word.split(':').collect();
    while parts.len() > 1 && parts.last() == Some(&"") {
        parts.pop();
    }
    if parts.len() < 2 {
        return None;
    }

    // Without {{deps}} it must plausibly be a classpath: all parts relative
    // and at least one of them with a directory in it
    if !word.contains(DEPS_MARKER) {
        if parts.iter().any(|p| platform.is_absolute(p)) {
            return None;
        }
        if !parts.iter().any(|p| platform.path_segments(p).len() >= 2) {
            return None;
        }
    }

    let normalized: Vec<String> = parts
        .iter()
        .map(|p| {
            if p.is_empty()
                || p.contains(DEPS_MARKER)
                || platform.is_absolute(p)
                || starts_dotted(p, platform)
            {
                p.to_string()
            } else {
                format!("./{}", p)
            }
        })
        .collect();

    let joined = normalized.join(":");
    if joined.starts_with("./") || joined.starts_with("~/") {
        Some(format!("{{{}}}", joined))
    } else {
        Some(word.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posix() -> Platform {
        Platform::posix("/home/u")
    }

    #[test]
    fn test_using_substitutions() {
        assert!(!using_substitutions("java -cp {{deps}} Main"));
        assert!(using_substitutions("java -cp {./lib} Main"));
        assert!(using_substitutions("cd out {;} ls"));
        assert!(using_substitutions("echo {~}"));
        assert!(using_substitutions("java @[-cp {{deps}}] Main"));
        assert!(!using_substitutions("echo {]}"));
    }

    #[test]
    fn test_relative_path_is_marked() {
        assert_eq!(
            suggest_substitutions("javac src/Main.java", &posix()),
            "javac {./src/Main.java}"
        );
        assert_eq!(
            suggest_substitutions("cat ./a/b ~/c/d", &posix()),
            "cat {./a/b} {~/c/d}"
        );
    }

    #[test]
    fn test_single_segment_and_absolute_untouched() {
        assert_eq!(
            suggest_substitutions("javac Main.java /tmp/x", &posix()),
            "javac Main.java /tmp/x"
        );
    }

    #[test]
    fn test_classpath_is_marked() {
        assert_eq!(
            suggest_substitutions("java -cp lib/a.jar:ext Main", &posix()),
            "java -cp {./lib/a.jar:./ext} Main"
        );
    }

    #[test]
    fn test_classpath_needs_a_directory() {
        assert_eq!(
            suggest_substitutions("java -cp lib:ext Main", &posix()),
            "java -cp lib:ext Main"
        );
    }

    #[test]
    fn test_absolute_classpath_untouched() {
        assert_eq!(
            suggest_substitutions("java -cp /opt/a.jar:/opt/b.jar Main", &posix()),
            "java -cp /opt/a.jar:/opt/b.jar Main"
        );
    }

    #[test]
    fn test_deps_argument_wrapped() {
        assert_eq!(
            suggest_substitutions("java -cp {{deps}} Main", &posix()),
            "java -cp @[{{deps}}] Main"
        );
        assert_eq!(
            suggest_substitutions("java -cp out:{{deps}} Main", &posix()),
            "java -cp @[{./out:{{deps}}}] Main"
        );
    }

    #[test]
    fn test_unmarkable_classpath_kept_as_written() {
        assert_eq!(
            suggest_substitutions("java -cp {{deps}}:out/classes Main", &posix()),
            "java -cp @[{{deps}}:out/classes] Main"
        );
        assert_eq!(
            suggest_substitutions("java -cp .:{{deps}} MainClass", &posix()),
            "java -cp @[.:{{deps}}] MainClass"
        );
        assert_eq!(
            suggest_substitutions("java -cp /opt/x.jar:{{deps}} Main", &posix()),
            "java -cp @[/opt/x.jar:{{deps}}] Main"
        );
        // Not a path either
        assert_eq!(
            suggest_substitutions("java -cp .:lib/a.jar Main", &posix()),
            "java -cp .:lib/a.jar Main"
        );
    }

    #[test]
    fn test_bracket_escaped_inside_args_file() {
        assert_eq!(
            suggest_substitutions("tool x[{{deps}}]", &posix()),
            "tool @[x[{{deps}}{]}]"
        );
    }

    #[test]
    fn test_leading_at_stripped() {
        assert_eq!(
            suggest_substitutions("@mytool -cp {{deps}}", &posix()),
            "mytool -cp @[{{deps}}]"
        );
    }

    #[test]
    fn test_separators_rendered() {
        assert_eq!(
            suggest_substitutions("a && b || (c ; d)", &posix()),
            "a && b || (c {;} d)"
        );
    }

    #[test]
    fn test_idempotent_on_marked_templates() {
        let marked = "javac {./src/Main.java} ; java -cp lib/a.jar:ext Main";
        assert_eq!(suggest_substitutions(marked, &posix()), marked);

        let planned = suggest_substitutions("javac -cp {{deps}} src/Main.java", &posix());
        assert_eq!(suggest_substitutions(&planned, &posix()), planned);
    }

    #[test]
    fn test_unparseable_template_untouched() {
        let template = "(javac src/Main.java";
        assert_eq!(suggest_substitutions(template, &posix()), template);
    }

    #[test]
    fn test_supports_args_files() {
        let p = posix();
        assert!(supports_args_files("java", &p));
        assert!(supports_args_files("/usr/bin/javac", &p));
        assert!(!supports_args_files("echo", &p));

        let win = Platform::windows("C:\\Users\\u");
        assert!(supports_args_files("C:\\jdk\\bin\\JAVA.EXE", &win));
        assert!(supports_args_files("jdeps.cmd", &win));
    }
}
