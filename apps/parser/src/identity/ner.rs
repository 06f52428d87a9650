//! Named-entity recognition seam.
//!
//! The name cascade only needs PERSON spans in document order. Any tagger that can supply
//! them plugs in behind [`EntityRecognizer`]; the default is a rule-based tagger.

use std::sync::LazyLock;

use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Person,
    Organization,
    Misc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecognizedEntity {
    pub text: String,
    pub label: EntityLabel,
    pub start: usize,
    pub end: usize,
}

/// Built once at startup and shared by reference across requests.
pub trait EntityRecognizer: Send + Sync {
    /// Entities in document order.
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity>;
}

/// Runs of capitalised words within a single line.
static CAPITALIZED_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{Lu}[\p{L}'’.-]*(?:[ \t]+\p{Lu}[\p{L}'’.-]*)*")
        .expect("valid capitalized-span regex")
});

/// Words that split a capitalised run into separate segments.
const FUNCTION_WORDS: &[&str] = &[
    "a", "an", "and", "at", "by", "for", "from", "in", "of", "on", "or", "the", "to", "with",
];

const ORGANIZATION_MARKERS: &[&str] = &[
    "inc", "inc.", "llc", "ltd", "ltd.", "corp", "corp.", "corporation", "company", "co.",
    "university", "college", "institute", "school", "academy", "labs", "technologies",
    "solutions", "systems", "group", "bank", "foundation", "gmbh", "plc",
];

/// Job titles, section headings and calendar words that look like names when capitalised.
const NON_PERSON_WORDS: &[&str] = &[
    "engineer", "developer", "manager", "senior", "junior", "lead", "intern", "analyst",
    "consultant", "architect", "director", "scientist", "designer", "specialist", "officer",
    "president", "head", "software", "data", "full", "stack", "frontend", "backend", "web",
    "curriculum", "vitae", "summary", "experience", "education", "skills", "projects",
    "certifications", "references", "languages", "interests", "achievements", "awards",
    "work", "history", "technical", "personal", "details", "contact", "information",
    "bachelor", "master", "degree", "science", "arts", "present", "current",
    "january", "february", "march", "april", "may", "june", "july", "august", "september",
    "october", "november", "december", "jan", "feb", "mar", "apr", "jun", "jul", "aug",
    "sep", "sept", "oct", "nov", "dec", "monday", "tuesday", "wednesday", "thursday",
    "friday", "saturday", "sunday", "street", "road", "avenue", "city",
];

/// Rule-based tagger over capitalised word runs.
///
/// Runs are split at function words, then each segment is labelled by marker words.
/// Segments of 2–4 tokens with no marker are tagged as people.
#[derive(Debug, Default)]
pub struct HeuristicRecognizer;

impl HeuristicRecognizer {
    pub fn new() -> Self {
        Self
    }
}

impl EntityRecognizer for HeuristicRecognizer {
    fn recognize(&self, text: &str) -> Vec<RecognizedEntity> {
        let mut entities = Vec::new();
        for run in CAPITALIZED_SPAN.find_iter(text) {
            for (start, end) in split_segments(run.as_str(), run.start()) {
                let segment = &text[start..end];
                entities.push(RecognizedEntity {
                    text: segment.to_string(),
                    label: classify(segment),
                    start,
                    end,
                });
            }
        }
        entities
    }
}

/// Byte ranges of the sub-runs of `run` between function words.
fn split_segments(run: &str, offset: usize) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut current: Option<(usize, usize)> = None;

    for (token_start, token) in tokens_with_offsets(run) {
        let token_end = token_start + token.len();
        if FUNCTION_WORDS.contains(&token.to_lowercase().as_str()) {
            if let Some(seg) = current.take() {
                segments.push(seg);
            }
            continue;
        }
        current = Some(match current {
            Some((s, _)) => (s, token_end),
            None => (token_start, token_end),
        });
    }
    if let Some(seg) = current {
        segments.push(seg);
    }

    segments
        .into_iter()
        .map(|(s, e)| (offset + s, offset + e))
        .collect()
}

fn tokens_with_offsets(run: &str) -> impl Iterator<Item = (usize, &str)> {
    run.split([' ', '\t'])
        .scan(0usize, |pos, token| {
            let start = *pos;
            *pos += token.len() + 1;
            Some((start, token))
        })
        .filter(|(_, token)| !token.is_empty())
}

fn classify(segment: &str) -> EntityLabel {
    let tokens: Vec<String> = segment
        .split_whitespace()
        .map(|t| t.to_lowercase())
        .collect();

    if tokens
        .iter()
        .any(|t| ORGANIZATION_MARKERS.contains(&t.as_str()))
    {
        return EntityLabel::Organization;
    }

    let bare = |t: &String| t.trim_matches(|c: char| !c.is_alphabetic()).to_string();
    if tokens
        .iter()
        .any(|t| NON_PERSON_WORDS.contains(&bare(t).as_str()))
    {
        return EntityLabel::Misc;
    }

    // "AWS GCP" style acronym lists.
    let all_acronyms = segment
        .split_whitespace()
        .all(|t| t.chars().count() <= 3 && t.chars().all(|c| !c.is_lowercase()));
    if all_acronyms {
        return EntityLabel::Misc;
    }

    if (2..=4).contains(&tokens.len()) {
        EntityLabel::Person
    } else {
        EntityLabel::Misc
    }
}
