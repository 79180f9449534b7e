use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::ManyToMany};

use super::{container, label_description};

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "labels")]
pub struct Label {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub dictionary_id: Option<i32>,
    pub suid: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[kmedia(skip)]
    pub r: LabelRelations,
}

#[derive(Debug, Clone, Default)]
pub struct LabelRelations {
    pub label_descriptions: Vec<label_description::LabelDescription>,
    pub containers: Vec<container::Container>,
}

impl ManyToMany<container::Entity> for Entity {
    const JOIN_TABLE: &'static str = "containers_labels";
    const LOCAL_COLUMN: &'static str = "label_id";
    const FOREIGN_COLUMN: &'static str = "container_id";

    type LocalKey = columns::Id;
    type ForeignKey = container::columns::Id;
}

has_many!(Label {
    label_descriptions: label_description via LabelId [
        load = load_label_descriptions,
        add = add_label_descriptions,
        set = set_label_descriptions,
        remove = remove_label_descriptions
    ];
});

many_to_many!(Label {
    containers: container [
        load = load_containers,
        add = add_containers,
        set = set_containers,
        remove = remove_containers
    ];
});
