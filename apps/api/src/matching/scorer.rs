//! Match Scorer — overlap between a resume's skills and one job's skill list.
//!
//! - `match_score`    = |matches| / |unique job skills|
//! - `weighted_score` = Σ 1/count(s) over matches / |unique job skills|
//!
//! `count(s)` is how often `s` appears in resume skills and job skills combined,
//! duplicates included, so a skill common to both lists weighs less.
//! Both denominators are floored at 1; both scores are rounded to 2 decimals.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::matching::extractor::SkillSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub match_score: f64,
    pub weighted_score: f64,
    /// Lower-cased skills found in both lists.
    pub matches: BTreeSet<String>,
    /// Lower-cased job skills the resume lacks.
    pub missing_skills: BTreeSet<String>,
    pub resume_skills: Vec<String>,
    pub job_skills: Vec<String>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn score(resume_skills: &SkillSet, job_skills: &[String]) -> MatchResult {
    let resume_lower: Vec<String> = resume_skills.iter().map(str::to_lowercase).collect();
    let job_lower: Vec<String> = job_skills.iter().map(|s| s.to_lowercase()).collect();

    let resume_unique: BTreeSet<&str> = resume_lower.iter().map(String::as_str).collect();
    let job_unique: BTreeSet<&str> = job_lower.iter().map(String::as_str).collect();

    let matches: BTreeSet<String> = resume_unique
        .intersection(&job_unique)
        .map(|s| s.to_string())
        .collect();
    let denominator = job_unique.len().max(1) as f64;

    let mut counts: HashMap<&str, u32> = HashMap::new();
    for skill in resume_lower.iter().chain(job_lower.iter()) {
        *counts.entry(skill.as_str()).or_insert(0) += 1;
    }

    let weighted_sum: f64 = matches
        .iter()
        .map(|s| 1.0 / f64::from(counts.get(s.as_str()).copied().unwrap_or(1)))
        .sum();

    let missing_skills = job_unique
        .iter()
        .filter(|s| !matches.contains(**s))
        .map(|s| s.to_string())
        .collect();

    MatchResult {
        match_score: round2(matches.len() as f64 / denominator),
        weighted_score: round2(weighted_sum / denominator),
        matches,
        missing_skills,
        resume_skills: resume_skills.to_vec(),
        job_skills: job_skills.to_vec(),
    }
}
