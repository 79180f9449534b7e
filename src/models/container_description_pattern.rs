use chrono::NaiveDateTime;

use crate::{
    DatabaseModel,
    entity::relation::{ManyToMany, Related},
};

use super::{catalog, language, user};

/// A file name pattern together with the description given to containers matching it.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "container_description_patterns")]
pub struct ContainerDescriptionPattern {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub pattern: Option<String>,
    pub description: Option<String>,
    pub lang_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub user_id: Option<i32>,

    #[kmedia(skip)]
    pub r: ContainerDescriptionPatternRelations,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerDescriptionPatternRelations {
    pub user: Option<Box<user::User>>,
    pub lang: Option<Box<language::Language>>,
    pub catalogs: Vec<catalog::Catalog>,
}

impl Related<user::Entity, columns::UserId> for Entity {
    type TargetColumn = user::columns::Id;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

impl ManyToMany<catalog::Entity> for Entity {
    const JOIN_TABLE: &'static str = "catalogs_container_description_patterns";
    const LOCAL_COLUMN: &'static str = "container_description_pattern_id";
    const FOREIGN_COLUMN: &'static str = "catalog_id";

    type LocalKey = columns::Id;
    type ForeignKey = catalog::columns::Id;
}

belongs_to!(ContainerDescriptionPattern {
    user: user via UserId [load = load_user, set = set_user, remove = remove_user];
    lang: language via LangId [load = load_lang, set = set_lang, remove = remove_lang];
});

many_to_many!(ContainerDescriptionPattern {
    catalogs: catalog [
        load = load_catalogs,
        add = add_catalogs,
        set = set_catalogs,
        remove = remove_catalogs
    ];
});
