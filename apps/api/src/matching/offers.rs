//! Job Offer Source — the bounded, read-only pool of offers scored per resume.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::matching::error::PipelineError;
use crate::models::job_offer::JobOfferRow;

pub const DEFAULT_OFFER_LIMIT: i64 = 10;

/// A job offer as consumed by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobOffer {
    pub id: Uuid,
    pub title: String,
    /// Skills as declared by the store, in order.
    pub skills: Vec<String>,
    /// `skills`, lower-cased, for matching.
    pub normalized_skills: Vec<String>,
}

impl JobOffer {
    pub fn new(id: Uuid, title: impl Into<String>, skills: Vec<String>) -> Self {
        let normalized_skills = skills.iter().map(|s| s.to_lowercase()).collect();
        Self {
            id,
            title: title.into(),
            skills,
            normalized_skills,
        }
    }
}

impl From<JobOfferRow> for JobOffer {
    fn from(row: JobOfferRow) -> Self {
        JobOffer::new(row.id, row.title, row.skills.unwrap_or_default())
    }
}

/// Narrow read-only view of the offer store.
#[async_trait]
pub trait JobOfferSource: Send + Sync {
    /// Returns at most `limit` offers in the store's natural order.
    async fn fetch_offers(&self, limit: i64) -> Result<Vec<JobOffer>, PipelineError>;
}

/// Offers from the `job_offers` table.
pub struct PgJobOfferSource {
    pool: PgPool,
}

impl PgJobOfferSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobOfferSource for PgJobOfferSource {
    async fn fetch_offers(&self, limit: i64) -> Result<Vec<JobOffer>, PipelineError> {
        if limit < 1 {
            return Err(PipelineError::Validation(format!(
                "offer limit must be positive, got {limit}"
            )));
        }

        let rows: Vec<JobOfferRow> =
            sqlx::query_as("SELECT id, title, skills FROM job_offers LIMIT $1")
                .bind(limit)
                .fetch_all(&self.pool)
                .await?;

        debug!("Fetched {} job offers (limit {limit})", rows.len());
        Ok(rows.into_iter().map(JobOffer::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgPoolOptions;

    #[test]
    fn test_normalized_skills_are_lowercased_in_order() {
        let offer = JobOffer::new(
            Uuid::new_v4(),
            "Backend Engineer",
            vec!["Python".to_string(), "SQL".to_string(), "python".to_string()],
        );
        assert_eq!(offer.skills, vec!["Python", "SQL", "python"]);
        assert_eq!(offer.normalized_skills, vec!["python", "sql", "python"]);
    }

    #[test]
    fn test_missing_skills_column_is_empty_list() {
        let offer = JobOffer::from(JobOfferRow {
            id: Uuid::new_v4(),
            title: "Recruiter".to_string(),
            skills: None,
        });
        assert!(offer.skills.is_empty());
        assert!(offer.normalized_skills.is_empty());
    }

    #[tokio::test]
    async fn test_non_positive_limit_rejected_before_query() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let source = PgJobOfferSource::new(pool);
        let err = source.fetch_offers(0).await.unwrap_err();
        assert!(matches!(err, PipelineError::Validation(_)));
    }
}
