use chrono::NaiveDateTime;

use crate::{
    DatabaseModel,
    entity::relation::{ManyToMany, Related},
};

use super::{container, file_asset_description, file_type, language, server, user};

/// A physical file stored on one of the download servers.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "file_assets")]
pub struct FileAsset {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub name: Option<String>,
    pub lang_id: Option<String>,
    /// References `file_types.name`.
    pub asset_type_id: Option<String>,
    pub date: Option<NaiveDateTime>,
    pub size: Option<i32>,
    /// References `servers.servername`.
    #[kmedia(default)]
    pub server_name_id: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub lastuser: Option<String>,
    #[kmedia(default)]
    pub clicks: Option<i32>,
    #[kmedia(default)]
    pub secure: Option<i32>,
    pub playtime_secs: Option<i32>,
    pub user_id: Option<i32>,

    #[kmedia(skip)]
    pub r: FileAssetRelations,
}

#[derive(Debug, Clone, Default)]
pub struct FileAssetRelations {
    pub asset_type: Option<Box<file_type::FileType>>,
    pub user: Option<Box<user::User>>,
    pub server_name: Option<Box<server::Server>>,
    pub lang: Option<Box<language::Language>>,
    pub file_asset_descriptions: Vec<file_asset_description::FileAssetDescription>,
    pub containers: Vec<container::Container>,
}

impl Related<file_type::Entity, columns::AssetTypeId> for Entity {
    type TargetColumn = file_type::columns::Name;
}

impl Related<user::Entity, columns::UserId> for Entity {
    type TargetColumn = user::columns::Id;
}

impl Related<server::Entity, columns::ServerNameId> for Entity {
    type TargetColumn = server::columns::Servername;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

impl ManyToMany<container::Entity> for Entity {
    const JOIN_TABLE: &'static str = "containers_file_assets";
    const LOCAL_COLUMN: &'static str = "file_asset_id";
    const FOREIGN_COLUMN: &'static str = "container_id";

    type LocalKey = columns::Id;
    type ForeignKey = container::columns::Id;
}

belongs_to!(FileAsset {
    asset_type: file_type via AssetTypeId [
        load = load_asset_type,
        set = set_asset_type,
        remove = remove_asset_type
    ];
    user: user via UserId [load = load_user, set = set_user, remove = remove_user];
    server_name: server via ServerNameId [
        load = load_server_name,
        set = set_server_name,
        remove = remove_server_name
    ];
    lang: language via LangId [load = load_lang, set = set_lang, remove = remove_lang];
});

has_many!(FileAsset {
    file_asset_descriptions: file_asset_description via FileId [
        load = load_file_asset_descriptions,
        add = add_file_asset_descriptions
    ];
});

many_to_many!(FileAsset {
    containers: container [
        load = load_containers,
        add = add_containers,
        set = set_containers,
        remove = remove_containers
    ];
});
