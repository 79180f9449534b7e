use chrono::NaiveDateTime;

use crate::DatabaseModel;

use super::dictionary_description;

/// A group of labels. Labels point at their dictionary without a foreign key constraint.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "dictionaries")]
pub struct Dictionary {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub suid: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[kmedia(skip)]
    pub r: DictionaryRelations,
}

#[derive(Debug, Clone, Default)]
pub struct DictionaryRelations {
    pub dictionary_descriptions: Vec<dictionary_description::DictionaryDescription>,
}

has_many!(Dictionary {
    dictionary_descriptions: dictionary_description via DictionaryId [
        load = load_dictionary_descriptions,
        add = add_dictionary_descriptions,
        set = set_dictionary_descriptions,
        remove = remove_dictionary_descriptions
    ];
});
