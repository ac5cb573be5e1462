use crate::error::PatternError;
use regex::Regex;

///
/// LikePattern
///
/// A LIKE pattern compiled once at construction.
///
/// `%` matches any run of characters, `_` exactly one, and a backslash
/// makes the next character literal. The pattern must cover the whole
/// value. A relaxed pattern may match anywhere inside the value and is
/// stored as its anchored equivalent, wrapped in `%`.
///

#[derive(Clone, Debug)]
pub struct LikePattern {
    source: String,
    regex: Regex,
}

impl LikePattern {
    pub fn new(source: &str, relaxed: bool) -> Result<Self, PatternError> {
        let source = if relaxed {
            unanchor(source)
        } else {
            source.to_string()
        };
        let compiled = format!("(?s)^(?:{})$", translate(&source));
        let regex =
            Regex::new(&compiled).map_err(|err| PatternError::new(&source, err.to_string()))?;

        Ok(Self { source, regex })
    }

    /// The anchored pattern text, as CQL would write it.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

// The compiled regex is derived from the source.
impl PartialEq for LikePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for LikePattern {}

// Wrap in `%`, doubling a lone trailing backslash so it stays literal.
fn unanchor(pattern: &str) -> String {
    let mut escaped = false;
    for c in pattern.chars() {
        escaped = !escaped && c == '\\';
    }

    let tail = if escaped { "\\%" } else { "%" };
    format!("%{pattern}{tail}")
}

// Translate LIKE wildcards into regex syntax, escaping everything else.
fn translate(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut literal = String::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        match c {
            '%' => {
                flush_literal(&mut out, &mut literal);
                out.push_str(".*");
            }
            '_' => {
                flush_literal(&mut out, &mut literal);
                out.push('.');
            }
            '\\' => literal.push(chars.next().unwrap_or('\\')),
            _ => literal.push(c),
        }
    }
    flush_literal(&mut out, &mut literal);

    out
}

fn flush_literal(out: &mut String, literal: &mut String) {
    if !literal.is_empty() {
        out.push_str(&regex::escape(literal));
        literal.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strict(pattern: &str) -> LikePattern {
        LikePattern::new(pattern, false).expect("pattern compiles")
    }

    fn relaxed(pattern: &str) -> LikePattern {
        LikePattern::new(pattern, true).expect("pattern compiles")
    }

    #[test]
    fn strict_patterns_cover_the_whole_value() {
        assert!(strict("%cd%").is_match("abcdef"));
        assert!(!strict("%cd").is_match("abcdef"));
        assert!(!strict("cd%").is_match("abcdef"));
        assert!(strict("abc___").is_match("abcdef"));
        assert!(!strict("abc__").is_match("abcdef"));
    }

    #[test]
    fn relaxed_patterns_match_anywhere() {
        assert!(relaxed("cd%").is_match("abcdef"));
        assert!(relaxed("%cd").is_match("abcdef"));
        assert!(!relaxed("xy%").is_match("abcdef"));
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        assert!(strict("a.c").is_match("a.c"));
        assert!(!strict("a.c").is_match("abc"));
        assert!(strict("(x)+[y]").is_match("(x)+[y]"));
    }

    #[test]
    fn backslash_escapes_wildcards() {
        assert!(strict("100\\%").is_match("100%"));
        assert!(!strict("100\\%").is_match("1000"));
        assert!(strict("a\\_b").is_match("a_b"));
        assert!(!strict("a\\_b").is_match("axb"));
        assert!(strict("a\\\\b").is_match("a\\b"));
    }

    #[test]
    fn wildcards_cross_newlines() {
        assert!(strict("a%b").is_match("a\nb"));
    }

    #[test]
    fn relaxed_patterns_are_stored_anchored() {
        assert_eq!(relaxed("cd%").source(), "%cd%%");
        assert_eq!(relaxed("cd%"), strict("%cd%%"));
        assert_eq!(relaxed("").source(), "%%");
    }

    #[test]
    fn relaxed_trailing_backslash_stays_literal() {
        let pattern = relaxed("a\\");

        assert_eq!(pattern.source(), "%a\\\\%");
        assert!(pattern.is_match("xa\\y"));
        assert!(!pattern.is_match("xay"));
        assert_eq!(relaxed("a\\\\").source(), "%a\\\\%");
    }

    #[test]
    fn equality_ignores_compiled_state() {
        assert_eq!(strict("a%"), strict("a%"));
        assert_ne!(strict("a%"), relaxed("a%"));
    }
}
