//! Matching Orchestrator — resume file in, ranked job matches out.
//!
//! Flow: recognize → extract_candidates → fetch_offers → score each offer →
//!       stable sort by weighted score (descending) → MatchingReport.
//!
//! Recognition and extraction block (child process, file I/O, CPU), so they run
//! on the blocking pool. Any stage error aborts the call.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::matching::error::PipelineError;
use crate::matching::extractor::{SkillExtractor, SkillSet};
use crate::matching::offers::JobOfferSource;
use crate::matching::recognizer::{RecognizedText, TextRecognizer};
use crate::matching::scorer::{score, MatchResult};

/// One scored offer in a report.
#[derive(Debug, Clone, Serialize)]
pub struct OfferMatch {
    pub job_id: Uuid,
    pub job_title: String,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchingReport {
    pub resume_skills: SkillSet,
    pub matching_results: Vec<OfferMatch>,
    pub extracted_text: String,
}

/// Output of the extraction-only path (no offer matching).
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub skills: SkillSet,
    pub extracted_text: String,
}

pub struct MatchingPipeline {
    recognizer: Arc<dyn TextRecognizer>,
    extractor: Arc<SkillExtractor>,
    offers: Arc<dyn JobOfferSource>,
    offer_limit: i64,
}

impl MatchingPipeline {
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        extractor: Arc<SkillExtractor>,
        offers: Arc<dyn JobOfferSource>,
        offer_limit: i64,
    ) -> Self {
        Self {
            recognizer,
            extractor,
            offers,
            offer_limit,
        }
    }

    /// Recognizes the file and extracts candidate skills.
    pub async fn extract_skills(&self, path: &Path) -> Result<ExtractionReport, PipelineError> {
        let (skills, text) = self.recognize_and_extract(path).await?;
        Ok(ExtractionReport {
            skills,
            extracted_text: text.into_string(),
        })
    }

    /// Full pipeline: extraction plus scoring against the offer pool.
    pub async fn process_resume(&self, path: &Path) -> Result<MatchingReport, PipelineError> {
        let (skills, text) = self.recognize_and_extract(path).await?;
        let offers = self.offers.fetch_offers(self.offer_limit).await?;

        let results: Vec<OfferMatch> = offers
            .into_iter()
            .map(|offer| OfferMatch {
                result: score(&skills, &offer.normalized_skills),
                job_id: offer.id,
                job_title: offer.title,
            })
            .collect();
        let matching_results = rank(results);

        info!(
            "Matched {} skills against {} offers (best weighted score {:.2})",
            skills.len(),
            matching_results.len(),
            matching_results
                .first()
                .map(|m| m.result.weighted_score)
                .unwrap_or(0.0)
        );

        Ok(MatchingReport {
            resume_skills: skills,
            matching_results,
            extracted_text: text.into_string(),
        })
    }

    async fn recognize_and_extract(
        &self,
        path: &Path,
    ) -> Result<(SkillSet, RecognizedText), PipelineError> {
        let recognizer = Arc::clone(&self.recognizer);
        let extractor = Arc::clone(&self.extractor);
        let path: PathBuf = path.to_path_buf();

        tokio::task::spawn_blocking(move || -> Result<_, PipelineError> {
            let text = recognizer.recognize(&path)?;
            let skills = extractor.extract_candidates(text.as_str());
            if skills.is_empty() {
                warn!("No skill candidates found in {}", path.display());
            }
            info!(
                "Recognized {} chars with {}, {} skill candidates",
                text.as_str().len(),
                recognizer.name(),
                skills.len()
            );
            Ok((skills, text))
        })
        .await
        .map_err(|e| PipelineError::Extraction(format!("recognition task aborted: {e}")))?
    }
}

/// Sorts by weighted score, highest first. Ties keep their input order.
pub fn rank(mut results: Vec<OfferMatch>) -> Vec<OfferMatch> {
    results.sort_by(|a, b| b.result.weighted_score.total_cmp(&a.result.weighted_score));
    results
}
