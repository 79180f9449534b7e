use chrono::NaiveDateTime;

use crate::DatabaseModel;

/// Feedback left by a visitor.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "comments")]
pub struct Comment {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub comment: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
