use super::ner::{EntityLabel, EntityRecognizer};
use super::patterns::{
    is_blacklisted, looks_like_full_name, strip_font_names, title_case, CAPITALIZED_RUN,
    TRAILING_NAME,
};

const LINE_SCAN_LIMIT: usize = 20;
const ENTITY_SCAN_LIMIT: usize = 40;

/// Inputs shared by every stage of the name cascade.
pub struct NameContext<'a> {
    /// Full extracted text.
    pub text: &'a str,
    /// Non-blank lines, already stripped of font noise for legacy `.doc` sources.
    pub lines: Vec<String>,
    pub email: Option<&'a str>,
    pub recognizer: &'a dyn EntityRecognizer,
}

impl<'a> NameContext<'a> {
    pub fn new(
        text: &'a str,
        lines: &[&str],
        legacy_doc: bool,
        email: Option<&'a str>,
        recognizer: &'a dyn EntityRecognizer,
    ) -> Self {
        let lines = if legacy_doc {
            lines
                .iter()
                .map(|l| strip_font_names(l))
                .filter(|l| !l.is_empty())
                .collect()
        } else {
            lines.iter().map(|l| l.to_string()).collect()
        };
        Self {
            text,
            lines,
            email,
            recognizer,
        }
    }
}

/// One strategy in the name cascade. Stages run in [`NameStage::CASCADE`] order and the
/// first one to produce a name wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameStage {
    /// A whole early line that reads as 2–4 capitalised words.
    LineScan,
    /// First PERSON entity from the recognizer.
    EntityRecognition,
    /// Capitalised run immediately before the email address.
    EmailProximity,
}

impl NameStage {
    pub const CASCADE: [NameStage; 3] = [
        NameStage::LineScan,
        NameStage::EntityRecognition,
        NameStage::EmailProximity,
    ];

    pub fn attempt(self, ctx: &NameContext<'_>) -> Option<String> {
        match self {
            NameStage::LineScan => line_scan(&ctx.lines),
            NameStage::EntityRecognition => entity_scan(&ctx.lines, ctx.recognizer),
            NameStage::EmailProximity => ctx.email.and_then(|e| near_email(ctx.text, e)),
        }
    }
}

fn line_scan(lines: &[String]) -> Option<String> {
    lines
        .iter()
        .take(LINE_SCAN_LIMIT)
        .filter(|line| !is_blacklisted(line))
        .map(|line| letters_only(line))
        .find(|cleaned| looks_like_full_name(cleaned))
        .map(|cleaned| title_case(&cleaned))
}

/// Drops everything except ASCII letters and whitespace.
fn letters_only(line: &str) -> String {
    line.chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

fn entity_scan(lines: &[String], recognizer: &dyn EntityRecognizer) -> Option<String> {
    let head = lines
        .iter()
        .take(ENTITY_SCAN_LIMIT)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n");

    recognizer
        .recognize(&head)
        .into_iter()
        .filter(|e| e.label == EntityLabel::Person)
        .map(|e| e.text.trim().to_string())
        .find(|name| looks_like_full_name(name) && !is_blacklisted(name))
}

/// The last two to four capitalised words before the first occurrence of `email`.
fn near_email(text: &str, email: &str) -> Option<String> {
    let boundary = text.find(email)?;
    let run = CAPITALIZED_RUN.find_iter(&text[..boundary]).last()?;
    TRAILING_NAME
        .find(run.as_str())
        .map(|m| m.as_str().to_string())
        .filter(|name| !is_blacklisted(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::ner::{HeuristicRecognizer, RecognizedEntity};
    use crate::identity::patterns::non_blank_lines;

    struct NoEntities;

    impl EntityRecognizer for NoEntities {
        fn recognize(&self, _text: &str) -> Vec<RecognizedEntity> {
            Vec::new()
        }
    }

    fn context<'a>(
        text: &'a str,
        email: Option<&'a str>,
        recognizer: &'a dyn EntityRecognizer,
    ) -> NameContext<'a> {
        NameContext::new(text, &non_blank_lines(text), false, email, recognizer)
    }

    #[test]
    fn test_line_scan_accepts_first_clean_line() {
        let text = "RESUME\nJohn Smith\njohn@x.io";
        let ctx = context(text, None, &NoEntities);
        assert_eq!(
            NameStage::LineScan.attempt(&ctx).as_deref(),
            Some("John Smith")
        );
    }

    #[test]
    fn test_line_scan_strips_punctuation_and_title_cases() {
        let text = "JOHN A. SMITH, PhD";
        let ctx = context(text, None, &NoEntities);
        assert_eq!(
            NameStage::LineScan.attempt(&ctx).as_deref(),
            Some("John A Smith Phd")
        );
    }

    #[test]
    fn test_line_scan_only_looks_at_first_twenty_lines() {
        let mut text = "x\n".repeat(20);
        text.push_str("Jane Doe\n");
        let ctx = context(&text, None, &NoEntities);
        assert_eq!(NameStage::LineScan.attempt(&ctx), None);
    }

    #[test]
    fn test_line_scan_skips_blacklisted_lines() {
        let text = "Contact Details\nPython Developer\nJane Doe";
        let ctx = context(text, None, &NoEntities);
        assert_eq!(NameStage::LineScan.attempt(&ctx).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_legacy_doc_lines_drop_font_names() {
        let text = "Calibri\nArial Jane Doe";
        let lines = non_blank_lines(text);
        let ctx = NameContext::new(text, &lines, true, None, &NoEntities);
        assert_eq!(ctx.lines, vec!["Jane Doe"]);
        assert_eq!(NameStage::LineScan.attempt(&ctx).as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_entity_scan_finds_person_inside_line() {
        let recognizer = HeuristicRecognizer::new();
        let text = "Candidate name is Ada Lovelace, London";
        let ctx = context(text, None, &recognizer);
        assert_eq!(NameStage::LineScan.attempt(&ctx), None);
        assert_eq!(
            NameStage::EntityRecognition.attempt(&ctx).as_deref(),
            Some("Ada Lovelace")
        );
    }

    #[test]
    fn test_entity_scan_rejects_blacklisted_person() {
        struct Fixed;
        impl EntityRecognizer for Fixed {
            fn recognize(&self, _text: &str) -> Vec<RecognizedEntity> {
                vec![RecognizedEntity {
                    text: "Docker Expert".into(),
                    label: EntityLabel::Person,
                    start: 0,
                    end: 13,
                }]
            }
        }
        let ctx = context("anything", None, &Fixed);
        assert_eq!(NameStage::EntityRecognition.attempt(&ctx), None);
    }

    #[test]
    fn test_email_proximity_takes_nearest_run() {
        let text = "Worked at Acme Corp for years; reach Jane Doe: jane@doe.io";
        let ctx = context(text, Some("jane@doe.io"), &NoEntities);
        assert_eq!(
            NameStage::EmailProximity.attempt(&ctx).as_deref(),
            Some("Jane Doe")
        );
    }

    #[test]
    fn test_email_proximity_keeps_words_next_to_email() {
        let text = "Alpha Beta Gamma Delta Epsilon x@y.z";
        let ctx = context(text, Some("x@y.z"), &NoEntities);
        assert_eq!(
            NameStage::EmailProximity.attempt(&ctx).as_deref(),
            Some("Beta Gamma Delta Epsilon")
        );
    }

    #[test]
    fn test_line_scan_drops_non_ascii_letters() {
        let ctx = context("José Álvarez", None, &NoEntities);
        assert_eq!(letters_only("José Álvarez"), "Jos lvarez");
        assert_eq!(NameStage::LineScan.attempt(&ctx), None);
    }

    #[test]
    fn test_email_proximity_requires_email() {
        let ctx = context("Jane Doe", None, &NoEntities);
        assert_eq!(NameStage::EmailProximity.attempt(&ctx), None);
    }
}
