use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use super::{decode_lossy, ExtractionResult};

/// Backslash control words (`\par`, `\fs24`) and literal braces.
static RTF_CONTROL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-z]+\d*|[{}]").expect("valid RTF control regex"));

/// Legacy `.doc`: lossy UTF-8 decode of the raw bytes, then RTF control stripping.
pub(super) fn extract(path: &Path) -> ExtractionResult<String> {
    let bytes = std::fs::read(path)?;
    Ok(clean_rtf(&decode_lossy(&bytes)))
}

/// Removes basic RTF control sequences and braces. Text content is left untouched.
pub fn clean_rtf(text: &str) -> String {
    RTF_CONTROL.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_clean_rtf_strips_control_words_and_braces() {
        let rtf = r"{\rtf1\ansi\deff0 {\fonttbl {\f0 Calibri;}}\f0\fs24 Jane Doe\par jane@doe.io}";
        let cleaned = clean_rtf(rtf);
        assert!(!cleaned.contains('\\'));
        assert!(!cleaned.contains('{'));
        assert!(!cleaned.contains('}'));
        assert!(cleaned.contains("Jane Doe"));
        assert!(cleaned.contains("jane@doe.io"));
    }

    #[test]
    fn test_clean_rtf_keeps_plain_text() {
        assert_eq!(clean_rtf("John Smith\nEngineer"), "John Smith\nEngineer");
    }

    #[test]
    fn test_clean_rtf_leaves_uppercase_escapes() {
        // Only lowercase control words are recognised.
        assert_eq!(clean_rtf(r"\Foo"), r"\Foo");
    }

    #[test]
    fn test_extract_decodes_and_cleans() {
        let mut file = tempfile::Builder::new().suffix(".doc").tempfile().unwrap();
        file.write_all(b"{\\rtf1\\b Jane Doe\\b0\\par\xff}").unwrap();
        let text = extract(file.path()).unwrap();
        assert_eq!(text, " Jane Doe");
    }
}
