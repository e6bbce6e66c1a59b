//! Best-effort markup removal for indexed text.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Tag { quote: Option<char> },
}

/// Remove markup tags from `input`, leaving plain text.
///
/// - `<...>` tags are removed; a `>` inside a quoted attribute value does not end the tag.
/// - `<!-- ... -->` comments are removed.
/// - A tag left open at the end of the input is dropped.
/// - A `<` followed by whitespace (or at the very end) is kept as text.
/// - Character entities are left as they are.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut state = State::Text;
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match state {
            State::Text => {
                if c != '<' {
                    out.push(c);
                    continue;
                }
                let next = chars.peek().map(|&(_, n)| n);
                match next {
                    None => out.push(c),
                    Some(n) if n.is_whitespace() => out.push(c),
                    Some(_) if input[i..].starts_with("<!--") => {
                        let body = i + "<!--".len();
                        match input[body..].find("-->") {
                            Some(end) => {
                                let resume = body + end + "-->".len();
                                while chars.peek().is_some_and(|(j, _)| *j < resume) {
                                    chars.next();
                                }
                            }
                            None => break,
                        }
                    }
                    Some(_) => state = State::Tag { quote: None },
                }
            }
            State::Tag { quote: Some(q) } => {
                if c == q {
                    state = State::Tag { quote: None };
                }
            }
            State::Tag { quote: None } => match c {
                '"' | '\'' => state = State::Tag { quote: Some(c) },
                '>' => state = State::Text,
                _ => {}
            },
        }
    }

    out
}
