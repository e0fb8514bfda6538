//! Line classification.
//!
//! A raw line belongs to exactly one grammar family, picked before any
//! tokenization happens: redirection (`>`) wins over parallel (`&`), which
//! wins over sequential (`;`), which wins over a plain command. A line is
//! never split on more than one operator kind.

pub const REDIRECT: char = '>';
pub const PARALLEL: char = '&';
pub const SEQUENCE: char = ';';

const INVALID_REDIRECTION: &str = "invalid redirection syntax.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveKind {
    Plain,
    Parallel,
    Sequential,
    Redirected,
    Malformed,
}

/// One command segment of a line plus the way it has to be run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Plain(Vec<String>),
    Parallel(Vec<String>),
    Sequential(Vec<String>),
    Redirected { tokens: Vec<String>, target: String },
    Malformed(String),
}

impl Directive {
    pub fn kind(&self) -> DirectiveKind {
        match self {
            Directive::Plain(_) => DirectiveKind::Plain,
            Directive::Parallel(_) => DirectiveKind::Parallel,
            Directive::Sequential(_) => DirectiveKind::Sequential,
            Directive::Redirected { .. } => DirectiveKind::Redirected,
            Directive::Malformed(_) => DirectiveKind::Malformed,
        }
    }

    /// Program name followed by its arguments. Empty for `Malformed`.
    pub fn tokens(&self) -> &[String] {
        match self {
            Directive::Plain(tokens)
            | Directive::Parallel(tokens)
            | Directive::Sequential(tokens)
            | Directive::Redirected { tokens, .. } => tokens,
            Directive::Malformed(_) => &[],
        }
    }

    pub fn output_target(&self) -> Option<&str> {
        match self {
            Directive::Redirected { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Directive::Malformed(message) => Some(message),
            _ => None,
        }
    }
}

/// Turns a raw input line into the ordered list of directives it describes.
pub fn classify(line: &str) -> Vec<Directive> {
    let line = line.trim();
    if line.is_empty() {
        return Vec::new();
    }

    if line.contains(REDIRECT) {
        vec![classify_redirection(line)]
    } else if line.contains(PARALLEL) {
        split_segments(line, PARALLEL)
            .map(Directive::Parallel)
            .collect()
    } else if line.contains(SEQUENCE) {
        split_segments(line, SEQUENCE)
            .map(Directive::Sequential)
            .collect()
    } else {
        vec![Directive::Plain(tokenize(line))]
    }
}

fn classify_redirection(line: &str) -> Directive {
    let Some((command, target)) = line.split_once(REDIRECT) else {
        return Directive::Malformed(INVALID_REDIRECTION.to_string());
    };

    let command = command.trim();
    let target = target.trim();
    if command.is_empty() || target.is_empty() {
        return Directive::Malformed(INVALID_REDIRECTION.to_string());
    }

    Directive::Redirected {
        tokens: tokenize(command),
        target: target.to_string(),
    }
}

fn split_segments(line: &str, operator: char) -> impl Iterator<Item = Vec<String>> + '_ {
    line.split(operator)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(tokenize)
}

fn tokenize(segment: &str) -> Vec<String> {
    segment.split_whitespace().map(String::from).collect()
}
