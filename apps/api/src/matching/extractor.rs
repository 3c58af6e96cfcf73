//! Skill Candidate Extractor — raw resume text to a normalized `SkillSet`.
//!
//! Steps:
//! 1. lower-case, strip everything but letters, digits, whitespace and hyphens
//! 2. language analysis → noun chunks + organization/technology entities
//! 3. keep phrases of 3–50 characters, title-cased, deduplicated
//! 4. drop generic resume words (`STOPLIST`)

use std::collections::BTreeSet;
use std::sync::Arc;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use crate::matching::analysis::LanguageAnalyzer;
use crate::matching::error::PipelineError;

/// Generic resume words that never count as skills.
pub const STOPLIST: &[&str] = &[
    "experience", "skills", "resume", "education", "work", "summary", "years", "email",
    "phone", "github", "linkedin",
];

pub const MIN_CANDIDATE_CHARS: usize = 3;
pub const MAX_CANDIDATE_CHARS: usize = 50;

/// A deduplicated, sorted set of candidate skills in display casing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, skill: String) -> bool {
        self.0.insert(skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(skill)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Title-cases a phrase: a letter is upper-cased when the character before it is
/// not a letter, lower-cased otherwise.
pub fn title_case(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut prev_is_letter = false;
    for c in phrase.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                // multi-char uppercase forms (ligatures, sharp s) keep only the
                // first char upper-cased
                let mut upper = c.to_uppercase();
                out.extend(upper.next());
                out.extend(upper.flat_map(char::to_lowercase));
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

pub struct SkillExtractor {
    analyzer: Arc<dyn LanguageAnalyzer>,
    disallowed: Regex,
}

impl SkillExtractor {
    pub fn new(analyzer: Arc<dyn LanguageAnalyzer>) -> Result<Self, PipelineError> {
        let disallowed = Regex::new(r"[^\p{Alphabetic}\p{Nd}\s-]")
            .map_err(|e| PipelineError::Validation(format!("bad cleanup pattern: {e}")))?;
        Ok(Self {
            analyzer,
            disallowed,
        })
    }

    /// Lower-cases and drops every character that is not a letter, digit,
    /// whitespace or hyphen.
    pub fn clean_text(&self, text: &str) -> String {
        self.disallowed
            .replace_all(&text.to_lowercase(), "")
            .into_owned()
    }

    pub fn extract_candidates(&self, text: &str) -> SkillSet {
        let cleaned = self.clean_text(text);
        if cleaned.trim().is_empty() {
            return SkillSet::new();
        }

        let analysis = self.analyzer.analyze(&cleaned);
        let phrases = analysis.noun_chunks.iter().map(String::as_str).chain(
            analysis
                .entities
                .iter()
                .filter(|e| e.label.is_skill_bearing())
                .map(|e| e.text.as_str()),
        );

        let mut candidates = SkillSet::new();
        for phrase in phrases {
            let normalized = title_case(phrase.trim());
            let chars = normalized.chars().count();
            if !(MIN_CANDIDATE_CHARS..=MAX_CANDIDATE_CHARS).contains(&chars) {
                continue;
            }
            if STOPLIST.contains(&normalized.to_lowercase().as_str()) {
                continue;
            }
            candidates.insert(normalized);
        }

        debug!(
            "extracted {} skill candidates from {} chunks and {} entities",
            candidates.len(),
            analysis.noun_chunks.len(),
            analysis.entities.len()
        );
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::analysis::{Analysis, Entity, EntityLabel, LexiconAnalyzer};

    /// Returns a canned analysis regardless of input.
    struct CannedAnalyzer(Analysis);

    impl LanguageAnalyzer for CannedAnalyzer {
        fn analyze(&self, _text: &str) -> Analysis {
            self.0.clone()
        }
    }

    fn lexicon_extractor() -> SkillExtractor {
        SkillExtractor::new(Arc::new(LexiconAnalyzer::new())).unwrap()
    }

    fn canned_extractor(chunks: &[&str], entities: Vec<Entity>) -> SkillExtractor {
        SkillExtractor::new(Arc::new(CannedAnalyzer(Analysis {
            noun_chunks: chunks.iter().map(|c| c.to_string()).collect(),
            entities,
        })))
        .unwrap()
    }

    #[test]
    fn test_title_case_matches_word_boundaries() {
        assert_eq!(title_case("machine learning"), "Machine Learning");
        assert_eq!(title_case("c-suite"), "C-Suite");
        assert_eq!(title_case("3d modeling"), "3D Modeling");
        assert_eq!(title_case("SQL"), "Sql");
    }

    #[test]
    fn test_title_case_expanding_uppercase_forms() {
        assert_eq!(title_case("\u{fb01}nance"), "Finance");
        assert_eq!(title_case("\u{df}trasse"), "Sstrasse");
        assert_eq!(title_case("stra\u{df}e"), "Stra\u{df}e");
    }

    #[test]
    fn test_ligature_candidates_title_case_cleanly() {
        let skills = lexicon_extractor().extract_candidates("stra\u{df}e \u{fb01}nance team");
        assert_eq!(skills, SkillSet::from_iter(["Stra\u{df}e Finance Team"]));
    }

    #[test]
    fn test_clean_text_strips_punctuation_keeps_hyphens() {
        let extractor = lexicon_extractor();
        assert_eq!(
            extractor.clean_text("Node.js, C++ & CI/CD | end-to-end!"),
            "nodejs c  cicd  end-to-end"
        );
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        assert!(lexicon_extractor().extract_candidates("").is_empty());
        assert!(lexicon_extractor().extract_candidates("  !!! ,, ").is_empty());
    }

    #[test]
    fn test_stoplist_entries_removed() {
        let extractor = canned_extractor(&["experience", "skills", "Python", "linkedin"], vec![]);
        let skills = extractor.extract_candidates("anything");
        assert_eq!(skills, SkillSet::from_iter(["Python"]));
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let fifty = "a".repeat(50);
        let fifty_one = "a".repeat(51);
        let extractor = canned_extractor(&["go", "aws", &fifty, &fifty_one], vec![]);
        let skills = extractor.extract_candidates("anything");
        assert!(skills.contains("Aws"));
        assert!(skills.contains(title_case(&fifty).as_str()));
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn test_only_skill_bearing_entities_kept() {
        let extractor = canned_extractor(
            &[],
            vec![
                Entity {
                    text: "acme corp".to_string(),
                    label: EntityLabel::Organization,
                },
                Entity {
                    text: "kubernetes".to_string(),
                    label: EntityLabel::Technology,
                },
                Entity {
                    text: "jane doe".to_string(),
                    label: EntityLabel::Person,
                },
            ],
        );
        let skills = extractor.extract_candidates("anything");
        assert_eq!(skills, SkillSet::from_iter(["Acme Corp", "Kubernetes"]));
    }

    #[test]
    fn test_duplicate_chunks_and_entities_collapse() {
        let extractor = canned_extractor(
            &["python", "Python"],
            vec![Entity {
                text: "python".to_string(),
                label: EntityLabel::Technology,
            }],
        );
        assert_eq!(extractor.extract_candidates("x").len(), 1);
    }

    #[test]
    fn test_resume_text_end_to_end() {
        let text = "SKILLS: Python, SQL and Docker. Experience: 5 years at Acme Robotics Inc. \
                    Built machine learning pipelines with the data team.";
        let skills = lexicon_extractor().extract_candidates(text);

        assert!(skills.contains("Python"));
        assert!(skills.contains("Sql"));
        assert!(skills.contains("Docker"));
        assert!(skills.contains("Acme Robotics Inc"));
        assert!(skills.contains("Machine Learning"));
        assert!(skills.contains("Machine Learning Pipelines"));
        assert!(!skills.contains("Skills"));
        assert!(!skills.contains("Experience"));
        assert!(!skills.contains("Years"));
    }

    #[test]
    fn test_candidates_respect_invariants() {
        let text = "Summary: Extremely motivated full-stack developer!!! Email: jane@example.com \
                    Phone 555-1234 GitHub github LinkedIn; worked on Kubernetes, Terraform \
                    and a supercalifragilisticexpialidocious-hyper-extended-platform-rewrite-initiative";
        let skills = lexicon_extractor().extract_candidates(text);
        assert!(!skills.is_empty());
        for skill in skills.iter() {
            let len = skill.chars().count();
            assert!((3..=50).contains(&len), "bad length for {skill}");
            assert!(!STOPLIST.contains(&skill.to_lowercase().as_str()), "stoplisted {skill}");
        }
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = lexicon_extractor();
        let text = "Senior Rust engineer, distributed systems, PostgreSQL and Kafka at Initech LLC";
        assert_eq!(
            extractor.extract_candidates(text),
            extractor.extract_candidates(text)
        );
    }
}
