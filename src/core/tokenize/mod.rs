// gitwip: working-copy status engine for the git CLI
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command string to argument vector, without a shell.
//!
//! ```text
//! git commit -m "fix: a b c"
//!        |
//!        v
//!  no $ " ' ?  --yes--> split on whitespace
//!        | no
//!        v
//!  pick separator from "#%&!?" not present in the command
//!  ' ' -> sep
//!  inside paired $ / " / ' regions: sep -> ' '
//!  drop '$'
//!  split on sep, strip one outer "..." / '...'
//!        |
//!        v
//!  ["git", "commit", "-m", "fix: a b c"]
//! ```
//!
//! A quote character opens a region only when it occurs an even number of
//! times in the whole command, so an apostrophe inside a double-quoted
//! argument is taken literally. The same quote character cannot nest.

use std::fmt;

use crate::error::TokenizeError;

/// Placeholder separator candidates, tried in order.
const SEPARATOR_CANDIDATES: [char; 5] = ['#', '%', '&', '!', '?'];

/// Internal quoting hint; never reaches the spawned process.
const DOLLAR_MARKER: char = '$';

/// Characters that may open a quoted region.
const REGION_MARKERS: [char; 3] = [DOLLAR_MARKER, '"', '\''];

/// Ordered program + arguments, ready for direct process invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    /// Program name or path (first element).
    #[must_use]
    pub fn program(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Positional arguments after the program.
    #[must_use]
    pub fn args(&self) -> &[String] {
        self.0.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for ArgumentVector {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

impl fmt::Display for ArgumentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arg) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            if arg.contains(' ') {
                write!(f, "\"{arg}\"")?;
            } else {
                f.write_str(arg)?;
            }
        }
        Ok(())
    }
}

/// Splits command strings into argument vectors.
///
/// The process runner only depends on this trait, so a stricter lexer can
/// replace [`ParityTokenizer`] without touching callers.
pub trait CommandTokenizer {
    /// Splits `command` into an argument vector.
    ///
    /// # Errors
    ///
    /// Returns a [`TokenizeError`] if the command cannot be split safely or is empty.
    fn tokenize(&self, command: &str) -> Result<ArgumentVector, TokenizeError>;
}

/// Quote-aware splitter using the occurrence-parity heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParityTokenizer;

impl CommandTokenizer for ParityTokenizer {
    fn tokenize(&self, command: &str) -> Result<ArgumentVector, TokenizeError> {
        tokenize(command)
    }
}

/// Splits `command` with the default [`ParityTokenizer`] rules.
///
/// # Errors
///
/// - [`TokenizeError::NoSeparator`] when all of `#%&!?` already occur in a
///   command that needs quote handling.
/// - [`TokenizeError::Empty`] when the command holds no arguments.
pub fn tokenize(command: &str) -> Result<ArgumentVector, TokenizeError> {
    let tokens: Vec<String> = if command.contains(REGION_MARKERS) {
        split_quoted(command)?
    } else {
        command.split_whitespace().map(str::to_string).collect()
    };

    if tokens.is_empty() {
        return Err(TokenizeError::Empty);
    }
    Ok(ArgumentVector(tokens))
}

fn split_quoted(command: &str) -> Result<Vec<String>, TokenizeError> {
    let sep = SEPARATOR_CANDIDATES
        .into_iter()
        .find(|c| !command.contains(*c))
        .ok_or_else(|| TokenizeError::NoSeparator {
            command: command.to_string(),
        })?;

    let masked = restore_quoted_spaces(&command.replace(' ', &sep.to_string()), sep);

    Ok(masked
        .split(sep)
        .filter(|token| !token.is_empty())
        .map(strip_outer_quotes)
        .collect())
}

/// Turns `sep` back into spaces inside paired quote regions and drops `$`.
fn restore_quoted_spaces(masked: &str, sep: char) -> String {
    let chars: Vec<char> = masked.chars().collect();
    let occurrences = |c: char| chars.iter().filter(|&&x| x == c).count();

    let mut out = String::with_capacity(masked.len());
    let mut open: Option<char> = None;

    for &c in &chars {
        match open {
            None if REGION_MARKERS.contains(&c) && occurrences(c) % 2 == 0 => {
                open = Some(c);
                out.push(c);
            }
            Some(q) if c == q => {
                open = None;
                out.push(c);
            }
            Some(_) if c == sep => out.push(' '),
            _ => out.push(c),
        }
    }

    out.retain(|c| c != DOLLAR_MARKER);
    out
}

fn strip_outer_quotes(token: &str) -> String {
    let bytes = token.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return token[1..token.len() - 1].to_string();
        }
    }
    token.to_string()
}
