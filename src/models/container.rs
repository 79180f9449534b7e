use chrono::NaiveDateTime;

use crate::{
    DatabaseModel,
    entity::relation::{ManyToMany, Related},
};

use super::{
    catalog, container_description, container_transcript, content_type, file_asset, label,
    language, lecturer, user, virtual_lesson,
};

/// A single media unit (a lesson, a clip, a program) and the files that make it up.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "containers")]
pub struct Container {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub name: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    pub filmdate: Option<NaiveDateTime>,
    pub lang_id: Option<String>,
    pub lecturer_id: Option<i32>,
    #[kmedia(default)]
    pub secure: i32,
    pub content_type_id: Option<i32>,
    pub marked_for_merge: Option<bool>,
    #[kmedia(default)]
    pub secure_changed: Option<bool>,
    #[kmedia(default)]
    pub auto_parsed: Option<bool>,
    pub virtual_lesson_id: Option<i32>,
    pub playtime_secs: Option<i32>,
    pub user_id: Option<i32>,
    #[kmedia(default)]
    pub for_censorship: Option<bool>,
    #[kmedia(default)]
    pub opened_by_censor: Option<bool>,
    #[kmedia(default)]
    pub closed_by_censor: Option<bool>,
    pub censor_id: Option<i32>,
    pub position: Option<i32>,

    #[kmedia(skip)]
    pub r: ContainerRelations,
}

#[derive(Debug, Clone, Default)]
pub struct ContainerRelations {
    pub lecturer: Option<Box<lecturer::Lecturer>>,
    pub content_type: Option<Box<content_type::ContentType>>,
    pub virtual_lesson: Option<Box<virtual_lesson::VirtualLesson>>,
    pub user: Option<Box<user::User>>,
    pub censor: Option<Box<user::User>>,
    pub lang: Option<Box<language::Language>>,
    pub container_transcripts: Vec<container_transcript::ContainerTranscript>,
    pub container_descriptions: Vec<container_description::ContainerDescription>,
    pub catalogs: Vec<catalog::Catalog>,
    pub labels: Vec<label::Label>,
    pub file_assets: Vec<file_asset::FileAsset>,
}

impl Related<lecturer::Entity, columns::LecturerId> for Entity {
    type TargetColumn = lecturer::columns::Id;
}

impl Related<content_type::Entity, columns::ContentTypeId> for Entity {
    type TargetColumn = content_type::columns::Id;
}

impl Related<virtual_lesson::Entity, columns::VirtualLessonId> for Entity {
    type TargetColumn = virtual_lesson::columns::Id;
}

impl Related<user::Entity, columns::UserId> for Entity {
    type TargetColumn = user::columns::Id;
}

impl Related<user::Entity, columns::CensorId> for Entity {
    type TargetColumn = user::columns::Id;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

impl ManyToMany<catalog::Entity> for Entity {
    const JOIN_TABLE: &'static str = "catalogs_containers";
    const LOCAL_COLUMN: &'static str = "container_id";
    const FOREIGN_COLUMN: &'static str = "catalog_id";

    type LocalKey = columns::Id;
    type ForeignKey = catalog::columns::Id;
}

impl ManyToMany<label::Entity> for Entity {
    const JOIN_TABLE: &'static str = "containers_labels";
    const LOCAL_COLUMN: &'static str = "container_id";
    const FOREIGN_COLUMN: &'static str = "label_id";

    type LocalKey = columns::Id;
    type ForeignKey = label::columns::Id;
}

impl ManyToMany<file_asset::Entity> for Entity {
    const JOIN_TABLE: &'static str = "containers_file_assets";
    const LOCAL_COLUMN: &'static str = "container_id";
    const FOREIGN_COLUMN: &'static str = "file_asset_id";

    type LocalKey = columns::Id;
    type ForeignKey = file_asset::columns::Id;
}

belongs_to!(Container {
    lecturer: lecturer via LecturerId [
        load = load_lecturer,
        set = set_lecturer,
        remove = remove_lecturer
    ];
    content_type: content_type via ContentTypeId [
        load = load_content_type,
        set = set_content_type,
        remove = remove_content_type
    ];
    virtual_lesson: virtual_lesson via VirtualLessonId [
        load = load_virtual_lesson,
        set = set_virtual_lesson,
        remove = remove_virtual_lesson
    ];
    user: user via UserId [load = load_user, set = set_user, remove = remove_user];
    censor: user via CensorId [load = load_censor, set = set_censor, remove = remove_censor];
    lang: language via LangId [load = load_lang, set = set_lang, remove = remove_lang];
});

has_many!(Container {
    container_transcripts: container_transcript via ContainerId [
        load = load_container_transcripts,
        add = add_container_transcripts,
        set = set_container_transcripts,
        remove = remove_container_transcripts
    ];
    container_descriptions: container_description via ContainerId [
        load = load_container_descriptions,
        add = add_container_descriptions
    ];
});

many_to_many!(Container {
    catalogs: catalog [
        load = load_catalogs,
        add = add_catalogs,
        set = set_catalogs,
        remove = remove_catalogs
    ];
    labels: label [load = load_labels, add = add_labels, set = set_labels, remove = remove_labels];
    file_assets: file_asset [
        load = load_file_assets,
        add = add_file_assets,
        set = set_file_assets,
        remove = remove_file_assets
    ];
});
