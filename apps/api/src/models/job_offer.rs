use sqlx::FromRow;
use uuid::Uuid;

/// Raw row from `job_offers`. `skills` is nullable in the store.
#[derive(Debug, Clone, FromRow)]
pub struct JobOfferRow {
    pub id: Uuid,
    pub title: String,
    pub skills: Option<Vec<String>>,
}
