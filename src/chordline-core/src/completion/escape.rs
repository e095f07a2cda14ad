//! Escaping of completion values for the command line.

/// Characters other than whitespace that would split or comment out a word.
const SPECIAL: [char; 4] = ['\\', '"', '\'', '#'];

/// Backslash-escape whitespace, quotes, backslash and `#`.
///
/// A newline is wrapped in single quotes instead, since the tokenizer drops
/// a backslash-newline pair as a line continuation.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '\n' {
            out.push_str("'\n'");
            continue;
        }
        if c.is_whitespace() || SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Drop one level of escaping: a backslash takes the next character
/// literally and a single-quoted run is copied as is. A trailing lone
/// backslash and an unpaired quote are kept.
pub fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(c) = rest.chars().next() {
        rest = &rest[c.len_utf8()..];
        match c {
            '\\' => match rest.chars().next() {
                Some(next) => {
                    out.push(next);
                    rest = &rest[next.len_utf8()..];
                }
                None => out.push('\\'),
            },
            '\'' => match rest.find('\'') {
                Some(end) => {
                    out.push_str(&rest[..end]);
                    rest = &rest[end + 1..];
                }
                None => out.push('\''),
            },
            other => out.push(other),
        }
    }
    out
}
