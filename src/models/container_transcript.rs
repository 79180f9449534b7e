use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::Related};

use super::{container, language};

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "container_transcripts")]
pub struct ContainerTranscript {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub container_id: Option<i32>,
    /// Table of contents.
    pub toc: Option<String>,
    pub transcript: Option<String>,
    pub lang_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[kmedia(skip)]
    pub r: ContainerTranscriptRelations,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerTranscriptRelations {
    pub container: Option<Box<container::Container>>,
    pub lang: Option<Box<language::Language>>,
}

impl Related<container::Entity, columns::ContainerId> for Entity {
    type TargetColumn = container::columns::Id;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

belongs_to!(ContainerTranscript {
    container: container via ContainerId [
        load = load_container,
        set = set_container,
        remove = remove_container
    ];
    lang: language via LangId [load = load_lang, set = set_lang, remove = remove_lang];
});
