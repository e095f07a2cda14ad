//! Command line tokenization.
//!
//! Lines are split with POSIX shell word rules:
//!
//! - Whitespace separates words: `set font mono`
//! - Quotes group: `set font "DejaVu Sans"`
//! - Backslash escapes: `open my\ file.pdf`
//! - `#` at the start of a word begins a comment

/// The prompt character that precedes named commands in the input bar.
pub const COMMAND_PROMPT: char = ':';

/// Split a line into words.
///
/// Returns `None` for malformed quoting (an unterminated quote or a trailing
/// backslash).
pub fn tokenize(line: &str) -> Option<Vec<String>> {
    shlex::split(line)
}

/// Strip one leading command prompt, if present.
pub fn strip_prompt(line: &str) -> &str {
    line.strip_prefix(COMMAND_PROMPT).unwrap_or(line)
}

/// Split off the first character of a line.
pub fn split_identifier(line: &str) -> Option<(char, &str)> {
    let mut chars = line.chars();
    let first = chars.next()?;
    Some((first, chars.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_shell_words() {
        assert_eq!(
            tokenize("s font mono").unwrap(),
            vec!["s", "font", "mono"]
        );
        assert_eq!(
            tokenize(r#"set font "DejaVu Sans""#).unwrap(),
            vec!["set", "font", "DejaVu Sans"]
        );
        assert_eq!(
            tokenize(r"open my\ file.pdf").unwrap(),
            vec!["open", "my file.pdf"]
        );
        assert_eq!(tokenize("echo a # comment").unwrap(), vec!["echo", "a"]);
    }

    #[test]
    fn test_tokenize_rejects_bad_quoting() {
        assert_eq!(tokenize(r#"set font "mono"#), None);
        assert_eq!(tokenize("set font 'mono"), None);
    }

    #[test]
    fn test_strip_prompt_only_once() {
        assert_eq!(strip_prompt(":set"), "set");
        assert_eq!(strip_prompt("::set"), ":set");
        assert_eq!(strip_prompt("set"), "set");
    }

    #[test]
    fn test_split_identifier() {
        assert_eq!(split_identifier("/needle"), Some(('/', "needle")));
        assert_eq!(split_identifier("é"), Some(('é', "")));
        assert_eq!(split_identifier(""), None);
    }
}
