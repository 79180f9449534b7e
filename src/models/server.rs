use chrono::NaiveDateTime;

use crate::DatabaseModel;

use super::file_asset;

/// A download server. File assets refer to it by `servername`.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "servers")]
pub struct Server {
    #[kmedia(default)]
    pub servername: String,
    pub httpurl: Option<String>,
    pub created: Option<NaiveDateTime>,
    pub updated: Option<NaiveDateTime>,
    pub lastuser: Option<String>,
    pub path: Option<String>,
    #[kmedia(primary_key, default)]
    pub id: i32,

    #[kmedia(skip)]
    pub r: ServerRelations,
}

#[derive(Debug, Clone, Default)]
pub struct ServerRelations {
    pub file_assets: Vec<file_asset::FileAsset>,
}

has_many!(Server {
    file_assets: file_asset via ServerNameId [
        load = load_file_assets,
        add = add_file_assets,
        set = set_file_assets,
        remove = remove_file_assets
    ];
});
