use crate::DatabaseModel;

use super::file_asset;

/// A file type, keyed by its name.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "file_types")]
pub struct FileType {
    #[kmedia(primary_key, default)]
    pub name: String,
    /// Comma separated file extensions.
    pub extlist: Option<String>,
    pub pic: Option<String>,

    #[kmedia(skip)]
    pub r: FileTypeRelations,
}

#[derive(Debug, Clone, Default)]
pub struct FileTypeRelations {
    pub file_assets: Vec<file_asset::FileAsset>,
}

has_many!(FileType {
    file_assets: file_asset via AssetTypeId [
        load = load_file_assets,
        add = add_file_assets,
        set = set_file_assets,
        remove = remove_file_assets
    ];
});
