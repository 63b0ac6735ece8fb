use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TagoError;
use crate::parse::normalize_directive;

/// A normalized `key` or `key=value` directive, e.g. `preload=true`.
///
/// Identity is the whole string, so `preload` and `preload=true` are
/// different instructions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instruction(String);

impl Instruction {
    /// Normalize a single directive. Returns `None` when nothing is left.
    pub fn parse(directive: &str) -> Option<Self> {
        normalize_directive(directive).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Text before the first `=`, trimmed.
    pub fn key(&self) -> &str {
        match self.0.split_once('=') {
            Some((key, _)) => key.trim(),
            None => self.0.trim(),
        }
    }

    /// Text after the first `=`, trimmed, or `"true"` for bare flags.
    pub fn value(&self) -> &str {
        match self.0.split_once('=') {
            Some((_, value)) => value.trim(),
            None => "true",
        }
    }

    /// Whether the directive was written without `=`.
    pub fn is_flag(&self) -> bool {
        !self.0.contains('=')
    }
}

impl From<&str> for Instruction {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Instruction {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl FromStr for Instruction {
    type Err = TagoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(TagoError::EmptyDirective)
    }
}

impl AsRef<str> for Instruction {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Instruction {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Path of a field from the traversal root, e.g. `address` or `address.city`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Plain concatenation; the separator must already be part of `prefix`.
    pub fn add_prefix(&self, prefix: &str) -> Self {
        let mut prefixed = String::with_capacity(prefix.len() + self.0.len());
        prefixed.push_str(prefix);
        prefixed.push_str(&self.0);
        Self(prefixed)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for FieldName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
