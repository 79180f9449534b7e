use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::Related};

use super::{language, lecturer};

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "lecturer_descriptions")]
pub struct LecturerDescription {
    #[kmedia(primary_key, default)]
    pub id: i32,
    #[kmedia(default)]
    pub lecturer_id: i32,
    #[kmedia(default)]
    pub desc: String,
    #[kmedia(default)]
    pub lang_id: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,

    #[kmedia(skip)]
    pub r: LecturerDescriptionRelations,
}

#[derive(Debug, Clone, Default)]
pub struct LecturerDescriptionRelations {
    pub lecturer: Option<Box<lecturer::Lecturer>>,
    pub lang: Option<Box<language::Language>>,
}

impl Related<lecturer::Entity, columns::LecturerId> for Entity {
    type TargetColumn = lecturer::columns::Id;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

belongs_to!(LecturerDescription {
    lecturer: lecturer via LecturerId [load = load_lecturer, set = set_lecturer];
    lang: language via LangId [load = load_lang, set = set_lang];
});
