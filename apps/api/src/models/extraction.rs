use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ExtractedSkillsRow {
    #[serde(skip_serializing)]
    pub id: Uuid,
    pub skills: Vec<String>,
    pub extracted_text: String,
    pub uploaded_at: DateTime<Utc>,
}
