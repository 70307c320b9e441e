//! Shell-word splitting for raw flag strings.
//!
//! Flag overrides arrive as a single string (from an environment variable or
//! a command-line option) and are tokenized into an argument vector before
//! being handed to a subprocess. Which quoting rules apply is an explicit
//! parameter so both rule sets stay testable on any platform.

use thiserror::Error;

/// Tokenization rules for raw flag strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotingStyle {
    /// POSIX shell rules: quotes group and are stripped, backslash escapes.
    Posix,
    /// Windows-style rules: quoted spans group but keep their quote
    /// characters, backslash is an ordinary character.
    NonPosix,
}

impl QuotingStyle {
    /// The native style of the compilation target.
    pub fn host() -> Self {
        if cfg!(windows) {
            QuotingStyle::NonPosix
        } else {
            QuotingStyle::Posix
        }
    }
}

/// Error returned when a flag string cannot be tokenized.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("missing closing quote")]
pub struct SplitError;

/// Split a raw flag string into argument tokens.
///
/// # Example
///
/// ```
/// use slipway::util::words::{split, QuotingStyle};
///
/// let tokens = split("-DFOO=1 -DBAR=2", QuotingStyle::Posix).unwrap();
/// assert_eq!(tokens, ["-DFOO=1", "-DBAR=2"]);
/// ```
pub fn split(text: &str, style: QuotingStyle) -> Result<Vec<String>, SplitError> {
    match style {
        QuotingStyle::Posix => shell_words::split(text).map_err(|_| SplitError),
        QuotingStyle::NonPosix => split_non_posix(text),
    }
}

/// Whitespace separates tokens; a quoted span runs to the matching quote and
/// keeps both quote characters in the token.
fn split_non_posix(text: &str) -> Result<Vec<String>, SplitError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                in_token = true;
                current.push(c);
                let mut closed = false;
                for quoted in chars.by_ref() {
                    current.push(quoted);
                    if quoted == c {
                        closed = true;
                        break;
                    }
                }
                if !closed {
                    return Err(SplitError);
                }
            }
            c if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            c => {
                in_token = true;
                current.push(c);
            }
        }
    }

    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}
