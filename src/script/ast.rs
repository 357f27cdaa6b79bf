/// Root of a parsed template, or the body of a group:
/// `javac -d out {./src/Main.java} && java Main`
#[derive(Debug, Clone, PartialEq)]
pub struct Commands {
    pub elements: Vec<Node>,
}

/// One element of a command list.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    // Simple command: "java -cp lib/a.jar Main"
    Command { words: Vec<String> },
    // Parenthesized sub-pipeline: "(cd out ; jar cf app.jar .)"
    Group(Commands),
    // Control joiner between commands
    Separator(SeparatorKind),
}

/// How two commands are chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeparatorKind {
    Sequence, // ;
    And,      // &&
    Or,       // ||
}

impl SeparatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeparatorKind::Sequence => ";",
            SeparatorKind::And => "&&",
            SeparatorKind::Or => "||",
        }
    }
}
