use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::Related};

use super::{container, language};

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "container_descriptions")]
pub struct ContainerDescription {
    #[kmedia(primary_key, default)]
    pub id: i32,
    #[kmedia(default)]
    pub container_id: i32,
    /// The localized title.
    pub container_desc: Option<String>,
    pub lang_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    /// The localized long description.
    pub descr: Option<String>,

    #[kmedia(skip)]
    pub r: ContainerDescriptionRelations,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerDescriptionRelations {
    pub container: Option<Box<container::Container>>,
    pub lang: Option<Box<language::Language>>,
}

impl Related<container::Entity, columns::ContainerId> for Entity {
    type TargetColumn = container::columns::Id;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

belongs_to!(ContainerDescription {
    container: container via ContainerId [load = load_container, set = set_container];
    lang: language via LangId [load = load_lang, set = set_lang, remove = remove_lang];
});
