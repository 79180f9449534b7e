use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::Related};

use super::{file_asset, language};

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "file_asset_descriptions")]
pub struct FileAssetDescription {
    #[kmedia(primary_key, default)]
    pub id: i32,
    #[kmedia(default)]
    pub file_id: i32,
    pub filedesc: Option<String>,
    pub lang_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,

    #[kmedia(skip)]
    pub r: FileAssetDescriptionRelations,
}

#[derive(Debug, Clone, Default)]
pub struct FileAssetDescriptionRelations {
    pub file: Option<Box<file_asset::FileAsset>>,
    pub lang: Option<Box<language::Language>>,
}

impl Related<file_asset::Entity, columns::FileId> for Entity {
    type TargetColumn = file_asset::columns::Id;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

belongs_to!(FileAssetDescription {
    file: file_asset via FileId [load = load_file, set = set_file];
    lang: language via LangId [load = load_lang, set = set_lang, remove = remove_lang];
});
