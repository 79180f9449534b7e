use crate::DatabaseModel;

use super::container;

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "content_types")]
pub struct ContentType {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub name: Option<String>,
    pub pattern: Option<String>,
    #[kmedia(default)]
    pub secure: Option<i32>,

    #[kmedia(skip)]
    pub r: ContentTypeRelations,
}

#[derive(Debug, Clone, Default)]
pub struct ContentTypeRelations {
    pub containers: Vec<container::Container>,
}

has_many!(ContentType {
    containers: container via ContentTypeId [
        load = load_containers,
        add = add_containers,
        set = set_containers,
        remove = remove_containers
    ];
});
