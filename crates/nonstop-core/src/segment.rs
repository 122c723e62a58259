//! Quote-aware splitting of compound commands into clauses and pipeline stages.

/// Operator words that end one command and start the next within a clause.
pub const STAGE_OPERATORS: &[&str] = &["|", "||", "&&", "&"];

/// Quoting state while scanning a command left to right.
#[derive(Debug, Default)]
struct QuoteState {
    single: bool,
    double: bool,
    escaped: bool,
}

impl QuoteState {
    /// Feed one character. Returns true if the character is outside any quoted region.
    fn advance(&mut self, c: char) -> bool {
        if self.escaped {
            self.escaped = false;
            return false;
        }
        match c {
            '\\' if !self.single => {
                self.escaped = true;
                false
            }
            '\'' if !self.double => {
                self.single = !self.single;
                false
            }
            '"' if !self.single => {
                self.double = !self.double;
                false
            }
            _ => !self.single && !self.double,
        }
    }
}

/// Split on `;` and newlines outside quoted regions. Pieces are trimmed; empty pieces are dropped.
///
/// An unbalanced quote leaves the remainder of the string in one piece.
pub fn split_clauses(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut buf = String::new();
    let mut state = QuoteState::default();

    for c in raw.chars() {
        if state.advance(c) && matches!(c, ';' | '\n') {
            push_trimmed(&mut parts, &buf);
            buf.clear();
            continue;
        }
        buf.push(c);
    }
    push_trimmed(&mut parts, &buf);
    parts
}

/// Split a command into the segments used to locate the clause backing a command.
///
/// `&&` and `||` split unconditionally; `;` splits only outside quotes.
pub fn split_segments(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    for piece in split_list_operators(raw) {
        parts.extend(split_clauses(&piece));
    }
    parts
}

/// Split one segment into pipeline stages at unquoted operator words.
///
/// Only a whitespace-delimited `|`, `&`, `||` or `&&` separates stages, the
/// same words the extractor treats as operators. `2>&1` stays in its stage.
pub fn split_stages(segment: &str) -> Vec<String> {
    let mut stages = Vec::new();
    let mut state = QuoteState::default();
    let mut stage_start = 0;
    // Start offset of the current word, and whether any of it was quoted.
    let mut word: Option<(usize, bool)> = None;

    for (i, c) in segment.char_indices() {
        let unquoted = state.advance(c);
        if unquoted && c.is_whitespace() {
            if let Some((start, quoted)) = word.take() {
                if !quoted && STAGE_OPERATORS.contains(&&segment[start..i]) {
                    push_trimmed(&mut stages, &segment[stage_start..start]);
                    stage_start = i;
                }
            }
            continue;
        }
        let current = word.get_or_insert((i, false));
        if !unquoted {
            current.1 = true;
        }
    }
    if let Some((start, false)) = word {
        if STAGE_OPERATORS.contains(&&segment[start..]) {
            push_trimmed(&mut stages, &segment[stage_start..start]);
            stage_start = segment.len();
        }
    }
    push_trimmed(&mut stages, &segment[stage_start..]);
    stages
}

fn split_list_operators(raw: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut buf = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if matches!(c, '&' | '|') && chars.peek() == Some(&c) {
            chars.next();
            parts.push(std::mem::take(&mut buf));
            continue;
        }
        buf.push(c);
    }
    parts.push(buf);
    parts
}

fn push_trimmed(parts: &mut Vec<String>, piece: &str) {
    let trimmed = piece.trim();
    if !trimmed.is_empty() {
        parts.push(trimmed.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_segments_on_list_operators() {
        assert_eq!(
            split_segments("ls -la && pwd || echo fail"),
            vec!["ls -la", "pwd", "echo fail"]
        );
    }

    #[test]
    fn test_split_segments_on_semicolon() {
        assert_eq!(split_segments("cat file; sudo rm x"), vec!["cat file", "sudo rm x"]);
    }

    #[test]
    fn test_semicolon_inside_quotes_is_kept() {
        assert_eq!(
            split_segments(r#"echo "a; b" ; echo 'c;d'"#),
            vec![r#"echo "a; b""#, "echo 'c;d'"]
        );
    }

    #[test]
    fn test_escaped_semicolon_is_kept() {
        assert_eq!(
            split_clauses(r"find . -exec ls {} \; ; pwd"),
            vec![r"find . -exec ls {} \;", "pwd"]
        );
    }

    #[test]
    fn test_empty_pieces_dropped() {
        assert_eq!(split_segments(" ;; ls ;  && "), vec!["ls"]);
        assert!(split_segments("   ").is_empty());
    }

    #[test]
    fn test_single_pipe_and_ampersand_do_not_split() {
        assert_eq!(split_segments("ps aux | grep node &"), vec!["ps aux | grep node &"]);
    }

    #[test]
    fn test_unbalanced_quote_is_best_effort() {
        assert_eq!(
            split_segments("ls; echo \"oops; pwd && cat x"),
            vec!["ls", "echo \"oops; pwd", "cat x"]
        );
    }

    #[test]
    fn test_newline_separates_clauses() {
        assert_eq!(split_clauses("ls\nrm -rf /"), vec!["ls", "rm -rf /"]);
        assert_eq!(split_clauses("echo 'a\nb'"), vec!["echo 'a\nb'"]);
        assert_eq!(split_clauses("ls \\\n -la"), vec!["ls \\\n -la"]);
    }

    #[test]
    fn test_split_stages_on_operator_words() {
        assert_eq!(
            split_stages("chmod +x a | chmod 777 /etc/passwd"),
            vec!["chmod +x a", "chmod 777 /etc/passwd"]
        );
        assert_eq!(split_stages("pkill sshd & pkill node &"), vec!["pkill sshd", "pkill node"]);
        assert_eq!(split_stages("ls && pwd"), vec!["ls", "pwd"]);
    }

    #[test]
    fn test_split_stages_keeps_quoted_and_attached_operators() {
        assert_eq!(split_stages(r#"echo "a | b" '&'"#), vec![r#"echo "a | b" '&'"#]);
        assert_eq!(split_stages(r"echo \| x"), vec![r"echo \| x"]);
        assert_eq!(split_stages("make 2>&1 a|b"), vec!["make 2>&1 a|b"]);
        assert!(split_stages("  ").is_empty());
    }

    #[test]
    fn test_split_clauses_ignores_list_operators() {
        assert_eq!(split_clauses("ls && pwd; cat x"), vec!["ls && pwd", "cat x"]);
    }
}
