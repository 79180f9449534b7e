use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::Related};

use super::{label, language};

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "label_descriptions")]
pub struct LabelDescription {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub label_id: Option<i32>,
    pub text: Option<String>,
    #[kmedia(default)]
    pub lang_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[kmedia(skip)]
    pub r: LabelDescriptionRelations,
}

#[derive(Debug, Clone, Default)]
pub struct LabelDescriptionRelations {
    pub label: Option<Box<label::Label>>,
    pub lang: Option<Box<language::Language>>,
}

impl Related<label::Entity, columns::LabelId> for Entity {
    type TargetColumn = label::columns::Id;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

belongs_to!(LabelDescription {
    label: label via LabelId [load = load_label, set = set_label, remove = remove_label];
    lang: language via LangId [load = load_lang, set = set_lang, remove = remove_lang];
});
