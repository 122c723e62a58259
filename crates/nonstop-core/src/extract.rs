//! Extraction of the command names a shell string would invoke.
//!
//! Each clause (separated by `;` or a newline) is word-split with POSIX
//! quoting rules and then walked token by token. A token occupies a *command position* when it is
//! the first real word of the clause, or the first real word after a pipe,
//! list, or background operator. Reserved words, flags and `NAME=value`
//! assignments never occupy a command position.

use crate::error::ParseError;
use crate::segment::{split_clauses, STAGE_OPERATORS};

/// Reserved words and grouping tokens that precede, rather than name, a command.
const SHELL_KEYWORDS: &[&str] = &[
    "if", "then", "else", "elif", "fi", "for", "while", "until", "do", "done", "case", "esac",
    "in", "!", "{", "}",
];

/// Extract the base names of every command in `raw`, in invocation order.
///
/// A lexical error in any clause fails the whole extraction.
pub fn extract_commands(raw: &str) -> Result<Vec<String>, ParseError> {
    let mut commands = Vec::new();

    for clause in split_clauses(raw) {
        let tokens = shlex::split(&clause).ok_or_else(|| ParseError::Lexical(clause.clone()))?;

        let mut expect_command = true;
        for token in &tokens {
            if STAGE_OPERATORS.contains(&token.as_str()) {
                expect_command = true;
                continue;
            }
            if SHELL_KEYWORDS.contains(&token.as_str())
                || token.starts_with('-')
                || is_assignment(token)
            {
                continue;
            }
            if expect_command {
                commands.push(base_name(token).to_string());
                expect_command = false;
            }
        }
    }

    Ok(commands)
}

/// Final path component of a command token: `/usr/bin/ls` -> `ls`.
///
/// A trailing slash yields an empty name, which no allowlist contains.
pub fn base_name(token: &str) -> &str {
    token.rsplit('/').next().unwrap_or(token)
}

fn is_assignment(token: &str) -> bool {
    token.contains('=') && !token.starts_with('=')
}
