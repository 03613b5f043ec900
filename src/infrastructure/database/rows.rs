use sqlx::FromRow;

/// Raw `applications` row. Timestamps are unix millis.
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationRow {
    pub application_id: String,
    pub electrician_id: String,
    pub status: String,
    pub remarks: Option<String>,
    pub fields: String,
    pub sync_status: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Raw `images` row.
#[derive(Debug, Clone, FromRow)]
pub struct ImageRow {
    pub image_url: String,
    pub reference_id: String,
    pub image_type: String,
    pub sync_status: String,
    pub created_at: i64,
}
