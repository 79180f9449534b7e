use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::Related};

use super::{dictionary, language};

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "dictionary_descriptions")]
pub struct DictionaryDescription {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub dictionary_id: Option<i32>,
    pub topic: Option<String>,
    #[kmedia(default)]
    pub lang_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[kmedia(skip)]
    pub r: DictionaryDescriptionRelations,
}

#[derive(Debug, Clone, Default)]
pub struct DictionaryDescriptionRelations {
    pub dictionary: Option<Box<dictionary::Dictionary>>,
    pub lang: Option<Box<language::Language>>,
}

impl Related<dictionary::Entity, columns::DictionaryId> for Entity {
    type TargetColumn = dictionary::columns::Id;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

belongs_to!(DictionaryDescription {
    dictionary: dictionary via DictionaryId [
        load = load_dictionary,
        set = set_dictionary,
        remove = remove_dictionary
    ];
    lang: language via LangId [load = load_lang, set = set_lang, remove = remove_lang];
});
