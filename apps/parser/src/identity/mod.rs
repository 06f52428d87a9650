//! Identity extraction: candidate name and email from free-form resume text.
//!
//! Resumes have no fixed layout, so the name is found by a cascade that relaxes its
//! structural assumptions stage by stage (see [`name::NameStage`]).

pub mod email;
pub mod name;
pub mod ner;
pub mod patterns;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::extraction::DocumentFormat;
use email::find_email;
use name::{NameContext, NameStage};
use ner::EntityRecognizer;
use patterns::non_blank_lines;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdentityResult {
    pub name: Option<String>,
    pub email: Option<String>,
}

/// Extracts `(name, email)` from `text`. `filename` is only used to detect legacy `.doc`
/// sources, whose lines carry font-table noise.
pub fn extract_identity(
    text: &str,
    filename: Option<&str>,
    recognizer: &dyn EntityRecognizer,
) -> IdentityResult {
    let email = find_email(text);

    let legacy_doc = filename
        .map(|f| DocumentFormat::from_filename(f) == DocumentFormat::LegacyDoc)
        .unwrap_or(false);
    let lines = non_blank_lines(text);
    let ctx = NameContext::new(text, &lines, legacy_doc, email.as_deref(), recognizer);

    let name = NameStage::CASCADE.iter().find_map(|stage| {
        let found = stage.attempt(&ctx)?;
        debug!("Name resolved by {stage:?} stage");
        Some(found)
    });

    IdentityResult { name, email }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ner::{HeuristicRecognizer, RecognizedEntity};

    struct NoEntities;

    impl EntityRecognizer for NoEntities {
        fn recognize(&self, _text: &str) -> Vec<RecognizedEntity> {
            Vec::new()
        }
    }

    #[test]
    fn test_name_and_email_from_simple_resume() {
        let text = "John Smith\njohn.smith@example.com\nSkills: Python";
        let identity = extract_identity(text, Some("john.txt"), &HeuristicRecognizer::new());
        assert_eq!(identity.email.as_deref(), Some("john.smith@example.com"));
        assert_eq!(identity.name.as_deref(), Some("John Smith"));
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        let identity = extract_identity("", None, &HeuristicRecognizer::new());
        assert_eq!(identity, IdentityResult::default());
    }

    #[test]
    fn test_no_capitalized_run_and_no_email() {
        let text = "skills: rust, go\nexperience: 5 years\nlooking for work";
        let identity = extract_identity(text, None, &HeuristicRecognizer::new());
        assert_eq!(identity.name, None);
        assert_eq!(identity.email, None);
    }

    #[test]
    fn test_falls_through_to_email_proximity() {
        // Every line is too long for the line scan and the recognizer is silent.
        let text = "Please direct all questions about this application to Maria Garcia at maria@garcia.dev today";
        let identity = extract_identity(text, None, &NoEntities);
        assert_eq!(identity.email.as_deref(), Some("maria@garcia.dev"));
        assert_eq!(identity.name.as_deref(), Some("Maria Garcia"));
    }

    #[test]
    fn test_legacy_doc_font_noise_is_removed() {
        let text = "Times New Roman\nCalibri Priya Natarajan\npriya@example.com";
        let identity = extract_identity(text, Some("cv.DOC"), &HeuristicRecognizer::new());
        assert_eq!(identity.name.as_deref(), Some("Priya Natarajan"));
    }

    #[test]
    fn test_font_noise_kept_for_other_formats() {
        let text = "Calibri Priya Natarajan\npriya@example.com";
        let identity = extract_identity(text, Some("cv.docx"), &NoEntities);
        // Without stripping, the line has three capitalised tokens and is accepted as is.
        assert_eq!(identity.name.as_deref(), Some("Calibri Priya Natarajan"));
    }
}
