use chrono::NaiveDateTime;

use crate::DatabaseModel;

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "ckeditor_assets")]
pub struct CkeditorAsset {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub data_file_name: String,
    pub data_content_type: Option<String>,
    pub data_file_size: Option<i32>,
    pub assetable_id: Option<i32>,
    pub assetable_type: Option<String>,
    /// The asset kind, stored in the `type` column.
    #[kmedia(column = "type")]
    pub kind: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
