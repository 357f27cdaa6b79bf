use crate::script::ast::{Commands, Node, SeparatorKind};
use std::iter::Peekable;
use std::vec::IntoIter;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input, missing ')'")]
    UnclosedGroup,
    #[error("unexpected ')' without matching '('")]
    UnexpectedClose,
    #[error("empty command")]
    EmptyCommand,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Open,
    Close,
    Separator(SeparatorKind),
    Word(String),
}

/// Parses a command template into its structural AST.
///
/// Only `;`, `&&`, `||` and parenthesized groups are understood. Words keep
/// their quote characters; dequoting is left to the host shell.
pub fn parse_commands(input: &str) -> Result<Commands, ParseError> {
    let mut parser = Parser {
        tokens: tokenize(input).into_iter().peekable(),
    };
    parser.parse_commands(0)
}

fn tokenize(input: &str) -> Vec<Token> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    let pair_at = |pos: usize, c: char| -> bool {
        chars[pos] == c && chars.get(pos + 1) == Some(&c)
    };

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        match c {
            '(' => {
                tokens.push(Token::Open);
                pos += 1;
            }
            ')' => {
                tokens.push(Token::Close);
                pos += 1;
            }
            ';' => {
                tokens.push(Token::Separator(SeparatorKind::Sequence));
                pos += 1;
            }
            '&' if pair_at(pos, '&') => {
                tokens.push(Token::Separator(SeparatorKind::And));
                pos += 2;
            }
            '|' if pair_at(pos, '|') => {
                tokens.push(Token::Separator(SeparatorKind::Or));
                pos += 2;
            }
            _ => {
                let mut word = String::new();
                let mut quote: Option<char> = None;

                while pos < chars.len() {
                    let c = chars[pos];
                    match quote {
                        Some(q) => {
                            if c == q {
                                quote = None;
                            }
                        }
                        None => {
                            if c.is_whitespace()
                                || c == '('
                                || c == ')'
                                || c == ';'
                                || pair_at(pos, '&')
                                || pair_at(pos, '|')
                            {
                                break;
                            }
                            if c == '"' || c == '\'' {
                                quote = Some(c);
                            }
                        }
                    }
                    // Quote characters are kept as part of the word
                    word.push(c);
                    pos += 1;
                }

                tokens.push(Token::Word(word));
            }
        }
    }

    tokens
}

struct Parser {
    tokens: Peekable<IntoIter<Token>>,
}

impl Parser {
    // commands ::= <elem>+
    fn parse_commands(&mut self, depth: usize) -> Result<Commands, ParseError> {
        let mut elements = Vec::new();

        loop {
            match self.tokens.peek() {
                None => break,
                // The enclosing group consumes the ')'
                Some(Token::Close) if depth > 0 => break,
                Some(_) => elements.push(self.parse_elem()?),
            }
        }

        if elements.is_empty() {
            return Err(ParseError::EmptyCommand);
        }

        Ok(Commands { elements })
    }

    // elem ::= <group> | <separator> | <command>
    fn parse_elem(&mut self) -> Result<Node, ParseError> {
        match self.tokens.peek() {
            Some(Token::Open) => self.parse_group(),
            Some(Token::Separator(kind)) => {
                let kind = *kind;
                self.tokens.next();
                Ok(Node::Separator(kind))
            }
            Some(Token::Close) => Err(ParseError::UnexpectedClose),
            Some(Token::Word(_)) => self.parse_command(),
            None => Err(ParseError::EmptyCommand),
        }
    }

    // group ::= '(' <commands> ')'
    fn parse_group(&mut self) -> Result<Node, ParseError> {
        self.tokens.next(); // consume (
        let inner = self.parse_commands(1)?;
        match self.tokens.next() {
            Some(Token::Close) => Ok(Node::Group(inner)),
            _ => Err(ParseError::UnclosedGroup),
        }
    }

    // command ::= <word>+
    fn parse_command(&mut self) -> Result<Node, ParseError> {
        let mut words = Vec::new();

        while let Some(Token::Word(_)) = self.tokens.peek() {
            if let Some(Token::Word(w)) = self.tokens.next() {
                words.push(w);
            }
        }

        if words.is_empty() {
            return Err(ParseError::EmptyCommand);
        }

        Ok(Node::Command { words })
    }
}
