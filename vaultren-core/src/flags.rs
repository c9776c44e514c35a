use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single supported regular-expression flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub ch: char,
    pub label: &'static str,
}

/// Every flag the pattern compiler understands, in display order.
///
/// `g` carries no engine option: replacements always substitute every
/// occurrence, so the flag is accepted for settings written with it.
const REGISTRY: &[FlagSpec] = &[
    FlagSpec {
        ch: 'g',
        label: "global",
    },
    FlagSpec {
        ch: 'i',
        label: "ignore case",
    },
    FlagSpec {
        ch: 'm',
        label: "multi-line",
    },
    FlagSpec {
        ch: 's',
        label: "dot matches newline",
    },
    FlagSpec {
        ch: 'x',
        label: "ignore whitespace",
    },
    FlagSpec {
        ch: 'U',
        label: "swap greed",
    },
    FlagSpec {
        ch: 'R',
        label: "CRLF line terminators",
    },
];

pub fn is_supported_flag(ch: char) -> bool {
    REGISTRY.iter().any(|spec| spec.ch == ch)
}

pub fn all_flags() -> &'static [FlagSpec] {
    REGISTRY
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported regular expression flag '{0}'")]
pub struct UnsupportedFlag(pub char);

/// Ordered set of distinct, registry-validated flag characters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct FlagSet {
    flags: Vec<char>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from persisted entries. Each entry is normally a single
    /// character, but every character of a longer entry is taken as its own
    /// flag. Duplicates collapse onto their first occurrence.
    pub fn parse<I, S>(entries: I) -> Result<Self, UnsupportedFlag>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for entry in entries {
            for ch in entry.as_ref().chars() {
                set.insert(ch)?;
            }
        }
        Ok(set)
    }

    /// Insert a flag, returning whether it was newly added
    pub fn insert(&mut self, ch: char) -> Result<bool, UnsupportedFlag> {
        if !is_supported_flag(ch) {
            return Err(UnsupportedFlag(ch));
        }
        if self.flags.contains(&ch) {
            return Ok(false);
        }
        self.flags.push(ch);
        Ok(true)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.flags.contains(&ch)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.flags.iter().copied()
    }

    /// One single-character string per flag, the persisted layout
    pub fn to_entries(&self) -> Vec<String> {
        self.flags.iter().map(char::to_string).collect()
    }
}

impl fmt::Display for FlagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.flags {
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<String>> for FlagSet {
    type Error = UnsupportedFlag;

    fn try_from(entries: Vec<String>) -> Result<Self, Self::Error> {
        Self::parse(entries)
    }
}

impl From<FlagSet> for Vec<String> {
    fn from(set: FlagSet) -> Self {
        set.to_entries()
    }
}
