use std::sync::LazyLock;

use regex::Regex;

/// Resume boilerplate that disqualifies a line or entity from being a name.
static BLACKLIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:phone|email|linkedin|cv|resume|profile|skills|experience|projects|education|machine learning|python|docker|algorithms|professional summary|summary|objective|contact)\b",
    )
    .expect("valid blacklist regex")
});

/// Font-family names that leak into text decoded from legacy `.doc` uploads.
static FONT_NAMES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:calibri|arial|times new roman|cambria|courier new|verdana|tahoma|georgia|helvetica)\b",
    )
    .expect("valid font-name regex")
});

pub(super) static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+").expect("valid email regex"));

/// Two or more `Capitalised` words separated by whitespace, as long as the run goes.
pub(super) static CAPITALIZED_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)+").expect("valid capitalized-run regex")
});

/// The last two to four `Capitalised` words of a run.
pub(super) static TRAILING_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+){1,3}$").expect("valid trailing-name regex")
});

pub fn is_blacklisted(text: &str) -> bool {
    BLACKLIST.is_match(text)
}

pub fn strip_font_names(line: &str) -> String {
    FONT_NAMES.replace_all(line, "").trim().to_string()
}

/// Every whitespace token starts with an uppercase letter, and there are 2–4 of them.
pub fn looks_like_full_name(text: &str) -> bool {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    (2..=4).contains(&tokens.len())
        && tokens
            .iter()
            .all(|t| t.chars().next().is_some_and(char::is_uppercase))
}

/// Splits on every line-boundary character, trims, and drops blank lines.
pub fn non_blank_lines(text: &str) -> Vec<&str> {
    text.split(is_line_boundary)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Uppercases the first letter of every alphabetic run and lowercases the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
