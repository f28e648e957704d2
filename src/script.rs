use std::fmt;

use thiserror::Error;

/// One line of a vector script.
///
/// Indices are parsed as `i64` so that negative indices reach the runner,
/// which rejects them as index errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    New(i64),
    Append(i32),
    Insert(i64, i32),
    Set(i64, i32),
    Get(i64),
    Remove(i64),
    Pop,
    Find(i32),
    Size,
    Capacity,
    /// `Vector: [..]`
    Print,
    /// `[..]`
    Show,
    Release,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::New(cap) => write!(f, "new {cap}"),
            Command::Append(v) => write!(f, "append {v}"),
            Command::Insert(i, v) => write!(f, "insert {i} {v}"),
            Command::Set(i, v) => write!(f, "set {i} {v}"),
            Command::Get(i) => write!(f, "get {i}"),
            Command::Remove(i) => write!(f, "remove {i}"),
            Command::Pop => f.write_str("pop"),
            Command::Find(v) => write!(f, "find {v}"),
            Command::Size => f.write_str("size"),
            Command::Capacity => f.write_str("capacity"),
            Command::Print => f.write_str("print"),
            Command::Show => f.write_str("show"),
            Command::Release => f.write_str("release"),
        }
    }
}

/// A command together with its 1-based source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement {
    pub line: usize,
    pub command: Command,
}

#[derive(Debug, Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: peg::error::ParseError<peg::str::LineCol>,
}

peg::parser!(pub grammar parser() for str {
    use super::Command;

    // A whole line; `None` for blank and comment-only lines.
    pub rule line() -> Option<Command>
        = _ c:command()? _ comment()? { c }

    rule command() -> Command
        = "new" __ n:index() { Command::New(n) }
        / ("append" / "push") __ v:value() { Command::Append(v) }
        / "insert" __ i:index() __ v:value() { Command::Insert(i, v) }
        / "set" __ i:index() __ v:value() { Command::Set(i, v) }
        / "get" __ i:index() { Command::Get(i) }
        / "remove" __ i:index() { Command::Remove(i) }
        / "pop" { Command::Pop }
        / "find" __ v:value() { Command::Find(v) }
        / "size" { Command::Size }
        / "capacity" { Command::Capacity }
        / "print" { Command::Print }
        / "show" { Command::Show }
        / "release" { Command::Release }

    rule index() -> i64
        = n:$("-"? ['0'..='9']+) {? n.parse().or(Err("64-bit integer")) }

    rule value() -> i32
        = n:$("-"? ['0'..='9']+) {? n.parse().or(Err("32-bit integer")) }

    rule comment()
        = "#" [_]*

    rule _() = quiet!{[' ' | '\t']*}

    rule __() = quiet!{[' ' | '\t']+}
});

/// Parses a script, skipping blank and comment lines.
pub fn parse(source: &str) -> Result<Vec<Statement>, ScriptError> {
    let mut statements = Vec::new();
    for (i, text) in source.lines().enumerate() {
        let line = i + 1;
        let parsed = parser::line(text).map_err(|source| ScriptError { line, source })?;
        if let Some(command) = parsed {
            statements.push(Statement { line, command });
        }
    }
    Ok(statements)
}
