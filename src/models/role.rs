use chrono::NaiveDateTime;

use crate::DatabaseModel;

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "roles")]
pub struct Role {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}
