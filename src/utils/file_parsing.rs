pub const DEFAULT_DELIMITERS: &str = "\t, ";

#[inline]
pub fn strip_surrounding_quotes(s: &str) -> &str {
    let b = s.as_bytes();
    if b.len() >= 2 {
        let first = b[0];
        let last = b[b.len() - 1];
        if (first == b'\'' && last == b'\'') || (first == b'"' && last == b'"') {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Splits a data line on any of the `delimiters` characters.
///
/// Runs of delimiters count as one separator, so `"a, b"` yields two fields.
/// Quoted sections keep their delimiters; the quotes themselves are stripped
/// from the returned field.
pub fn split_fields(line: &str, delimiters: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut cur = String::new();
    let mut in_quotes: Option<char> = None;

    for ch in line.chars() {
        match in_quotes {
            Some(q) => {
                cur.push(ch);
                if ch == q {
                    in_quotes = None;
                }
            }
            None => {
                if ch == '"' || ch == '\'' {
                    in_quotes = Some(ch);
                    cur.push(ch);
                } else if delimiters.contains(ch) {
                    flush(&mut out, &mut cur);
                } else {
                    cur.push(ch);
                }
            }
        }
    }
    flush(&mut out, &mut cur);
    out
}

fn flush(out: &mut Vec<String>, cur: &mut String) {
    let field = cur.trim();
    if !field.is_empty() {
        out.push(strip_surrounding_quotes(field).to_string());
    }
    cur.clear();
}
