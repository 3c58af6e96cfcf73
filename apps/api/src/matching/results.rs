use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::extraction::ExtractedSkillsRow;

/// Records one extraction result.
pub async fn store_extraction(
    pool: &PgPool,
    skills: &[String],
    extracted_text: &str,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO extracted_skills (id, skills, extracted_text) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(skills)
        .bind(extracted_text)
        .execute(pool)
        .await?;

    info!("Stored extraction {id} ({} skills)", skills.len());
    Ok(id)
}

/// All stored extractions, newest first.
pub async fn list_extractions(pool: &PgPool) -> Result<Vec<ExtractedSkillsRow>, sqlx::Error> {
    sqlx::query_as::<_, ExtractedSkillsRow>(
        "SELECT id, skills, extracted_text, uploaded_at FROM extracted_skills ORDER BY uploaded_at DESC",
    )
    .fetch_all(pool)
    .await
}
