//! Language analysis — noun-phrase chunking and named-entity recognition.
//!
//! `LanguageAnalyzer` is the seam for a model-backed analyzer; the built-in
//! `LexiconAnalyzer` tags tokens with closed-class word lists and recognizes
//! technology and organization names from lexicons.

use std::collections::HashSet;

/// Entity categories an analyzer can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityLabel {
    Organization,
    Technology,
    // produced by model-backed analyzers
    #[allow(dead_code)]
    Person,
    #[allow(dead_code)]
    Location,
}

impl EntityLabel {
    /// Organization-like and technology-like entities can name a skill.
    pub fn is_skill_bearing(self) -> bool {
        matches!(self, EntityLabel::Organization | EntityLabel::Technology)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub text: String,
    pub label: EntityLabel,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub noun_chunks: Vec<String>,
    pub entities: Vec<Entity>,
}

/// Runs over any input, including empty or non-English text, without failing.
pub trait LanguageAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Analysis;
}

// ────────────────────────────────────────────────────────────────────────────
// Lexicons
// ────────────────────────────────────────────────────────────────────────────

const DETERMINERS: &[&str] = &[
    "a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its",
    "our", "their", "each", "every", "some", "any", "no", "all", "both", "another",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "we", "us", "you", "he", "him", "she", "it", "they", "them", "myself",
    "ourselves", "who", "whom", "which", "what", "whose",
];

const ADPOSITIONS: &[&str] = &[
    "of", "in", "on", "at", "by", "for", "with", "from", "to", "into", "onto", "over", "under",
    "about", "across", "through", "during", "within", "without", "between", "among", "via",
    "per", "as", "than", "since", "until", "up",
];

const CONJUNCTIONS: &[&str] = &[
    "and", "or", "but", "nor", "so", "yet", "while", "if", "because", "although", "whereas",
];

const AUXILIARIES: &[&str] = &[
    "am", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
    "does", "did", "will", "would", "shall", "should", "can", "could", "may", "might", "must",
    "not",
];

const VERBS: &[&str] = &[
    "developed", "led", "lead", "managed", "manage", "built", "build", "designed", "design",
    "implemented", "implement", "created", "create", "worked", "using", "used", "use",
    "including", "include", "includes", "improved", "improve", "maintained", "maintain",
    "delivered", "deliver", "collaborated", "collaborate", "reduced", "reduce", "increased",
    "increase", "achieved", "achieve", "launched", "migrated", "automated", "optimized",
    "supported", "mentored", "wrote", "write", "owned", "drove", "contributed", "tested",
    "deployed", "deploy",
];

const ADVERB_SUFFIXES: &[&str] = &["ally", "ully", "ively", "ently", "ously", "antly"];

const ADVERBS: &[&str] = &[
    "very", "also", "currently", "previously", "highly", "well", "again", "then", "now",
    "there", "here",
];

/// Trailing tokens that mark an organization name.
const ORGANIZATION_SUFFIXES: &[&str] = &[
    "inc", "corp", "corporation", "llc", "ltd", "limited", "gmbh", "university", "college",
    "institute", "labs", "technologies", "bank",
];

/// Technology names recognized as entities, lower-cased, after punctuation
/// stripping (so "node.js" appears as "nodejs").
const TECHNOLOGIES: &[&str] = &[
    "python", "java", "javascript", "typescript", "html", "css", "react", "angular", "vue",
    "nodejs", "sql", "mysql", "postgresql", "postgres", "mongodb", "redis", "docker",
    "kubernetes", "aws", "azure", "gcp", "google cloud", "linux", "git", "rust", "golang",
    "kotlin", "swift", "scala", "ruby", "ruby on rails", "php", "django", "flask", "spring",
    "spring boot", "tensorflow", "pytorch", "pandas", "numpy", "scikit-learn",
    "machine learning", "deep learning", "data science", "natural language processing",
    "computer vision", "spark", "hadoop", "kafka", "terraform", "jenkins", "graphql",
    "rest api", "excel", "tableau", "power bi", "figma", "jira",
];

/// Longest technology name, in tokens.
const MAX_TECH_TOKENS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Function,
    Verb,
    Adverb,
    Number,
    Punct,
    Nominal,
}

// ────────────────────────────────────────────────────────────────────────────
// LexiconAnalyzer
// ────────────────────────────────────────────────────────────────────────────

/// Word-list analyzer. Immutable after construction, so one instance is shared
/// across all requests.
pub struct LexiconAnalyzer {
    function_words: HashSet<&'static str>,
    verbs: HashSet<&'static str>,
    adverbs: HashSet<&'static str>,
    org_suffixes: HashSet<&'static str>,
    technologies: HashSet<String>,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconAnalyzer {
    pub fn new() -> Self {
        let function_words = DETERMINERS
            .iter()
            .chain(PRONOUNS)
            .chain(ADPOSITIONS)
            .chain(CONJUNCTIONS)
            .chain(AUXILIARIES)
            .copied()
            .collect();

        Self {
            function_words,
            verbs: VERBS.iter().copied().collect(),
            adverbs: ADVERBS.iter().copied().collect(),
            org_suffixes: ORGANIZATION_SUFFIXES.iter().copied().collect(),
            technologies: TECHNOLOGIES.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Adds technology names to the entity lexicon. Names are lower-cased and
    /// whitespace-normalized; names longer than four tokens are ignored.
    pub fn with_technologies<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            let tokens: Vec<String> = name
                .as_ref()
                .split_whitespace()
                .map(str::to_lowercase)
                .collect();
            if !tokens.is_empty() && tokens.len() <= MAX_TECH_TOKENS {
                self.technologies.insert(tokens.join(" "));
            }
        }
        self
    }

    fn tag(&self, token: &str) -> Tag {
        if token.chars().all(|c| c == '-') {
            Tag::Punct
        } else if token.chars().all(|c| c.is_numeric()) {
            Tag::Number
        } else if self.function_words.contains(token) {
            Tag::Function
        } else if self.verbs.contains(token) {
            Tag::Verb
        } else if self.adverbs.contains(token)
            || ADVERB_SUFFIXES.iter().any(|s| token.len() > s.len() + 2 && token.ends_with(s))
        {
            Tag::Adverb
        } else {
            Tag::Nominal
        }
    }

    /// Maximal runs of nominal tokens, as `[start, end)` token ranges.
    fn nominal_runs(tags: &[Tag]) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        let mut start = None;
        for (i, tag) in tags.iter().enumerate() {
            match (tag, start) {
                (Tag::Nominal, None) => start = Some(i),
                (Tag::Nominal, Some(_)) => {}
                (_, Some(s)) => {
                    runs.push((s, i));
                    start = None;
                }
                (_, None) => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, tags.len()));
        }
        runs
    }

    fn technology_entities(&self, tokens: &[&str]) -> Vec<Entity> {
        let mut entities = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            let longest = (1..=MAX_TECH_TOKENS.min(tokens.len() - i))
                .rev()
                .find(|&n| self.technologies.contains(&tokens[i..i + n].join(" ")));
            match longest {
                Some(n) => {
                    entities.push(Entity {
                        text: tokens[i..i + n].join(" "),
                        label: EntityLabel::Technology,
                    });
                    i += n;
                }
                None => i += 1,
            }
        }
        entities
    }

    fn organization_entities(&self, tokens: &[&str], runs: &[(usize, usize)]) -> Vec<Entity> {
        let mut entities = Vec::new();
        for &(start, end) in runs {
            for j in (start + 1)..end {
                if self.org_suffixes.contains(tokens[j]) {
                    entities.push(Entity {
                        text: tokens[start..=j].join(" "),
                        label: EntityLabel::Organization,
                    });
                }
            }
        }
        entities
    }
}

impl LanguageAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Analysis {
        let lowered = text.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let tags: Vec<Tag> = tokens.iter().map(|t| self.tag(t)).collect();
        let runs = Self::nominal_runs(&tags);

        let noun_chunks = runs
            .iter()
            .map(|&(start, end)| tokens[start..end].join(" "))
            .collect();

        let mut entities = self.technology_entities(&tokens);
        entities.extend(self.organization_entities(&tokens, &runs));

        Analysis {
            noun_chunks,
            entities,
        }
    }
}
