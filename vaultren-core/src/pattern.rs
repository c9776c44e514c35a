use crate::flags::{FlagSet, UnsupportedFlag};
use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("unsupported regular expression flag '{0}'")]
    UnsupportedFlag(char),
    /// Carries the engine's own message untouched
    #[error("{0}")]
    SyntaxError(String),
}

impl Serialize for CompileError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<UnsupportedFlag> for CompileError {
    fn from(err: UnsupportedFlag) -> Self {
        Self::UnsupportedFlag(err.0)
    }
}

/// A compiled pattern ready to test and rewrite file names
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Nothing typed yet: matches no name and rewrites nothing
    NoOp,
    Regex { regex: Regex, flags: FlagSet },
}

impl Matcher {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Regex { .. })
    }

    pub fn test(&self, name: &str) -> bool {
        match self {
            Self::NoOp => false,
            Self::Regex { regex, .. } => regex.is_match(name),
        }
    }

    /// Replace every match in `name`. `template` uses the engine's native
    /// group references (`$1`, `${name}`, `$$` for a literal dollar).
    pub fn replace_all<'a>(&self, name: &'a str, template: &str) -> Cow<'a, str> {
        match self {
            Self::NoOp => Cow::Borrowed(name),
            Self::Regex { regex, .. } => regex.replace_all(name, template),
        }
    }
}

/// Compile `source` with an already validated flag set.
///
/// An empty source yields [`Matcher::NoOp`] rather than an error.
pub fn compile(source: &str, flags: &FlagSet) -> Result<Matcher, CompileError> {
    if source.is_empty() {
        return Ok(Matcher::NoOp);
    }

    let regex = RegexBuilder::new(source)
        .case_insensitive(flags.contains('i'))
        .multi_line(flags.contains('m'))
        .dot_matches_new_line(flags.contains('s'))
        .ignore_whitespace(flags.contains('x'))
        .swap_greed(flags.contains('U'))
        .crlf(flags.contains('R'))
        .build()
        .map_err(|e| CompileError::SyntaxError(e.to_string()))?;

    tracing::debug!(source, flags = %flags, "compiled pattern");

    Ok(Matcher::Regex {
        regex,
        flags: flags.clone(),
    })
}

/// Validate persisted flag entries, then compile.
///
/// Flags are checked first so an unsupported flag is reported even when the
/// source is empty, and the engine is never invoked with one.
pub fn compile_entries<S: AsRef<str>>(source: &str, flags: &[S]) -> Result<Matcher, CompileError> {
    let flags = FlagSet::parse(flags)?;
    compile(source, &flags)
}
