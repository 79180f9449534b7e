use chrono::NaiveDateTime;

use crate::{
    DatabaseModel,
    entity::relation::{ManyToMany, Related},
};

use super::{catalog_description, container, container_description_pattern, user};

/// A node of the catalog tree. Containers are filed under any number of catalogs.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "catalogs")]
pub struct Catalog {
    #[kmedia(primary_key, default)]
    pub id: i32,
    #[kmedia(default)]
    pub name: String,
    pub parent_id: Option<i32>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    /// Sort position among siblings.
    #[kmedia(default)]
    pub catorder: i32,
    #[kmedia(default)]
    pub secure: i32,
    #[kmedia(default)]
    pub visible: Option<bool>,
    #[kmedia(default)]
    pub open: Option<bool>,
    pub label: Option<String>,
    pub selected_catalog: Option<i32>,
    pub user_id: Option<i32>,
    pub books_catalog: Option<bool>,

    #[kmedia(skip)]
    pub r: CatalogRelations,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogRelations {
    pub user: Option<Box<user::User>>,
    pub parent: Option<Box<Catalog>>,
    pub child_catalogs: Vec<Catalog>,
    pub catalog_descriptions: Vec<catalog_description::CatalogDescription>,
    pub containers: Vec<container::Container>,
    pub container_description_patterns:
        Vec<container_description_pattern::ContainerDescriptionPattern>,
}

impl Related<user::Entity, columns::UserId> for Entity {
    type TargetColumn = user::columns::Id;
}

impl Related<Entity, columns::ParentId> for Entity {
    type TargetColumn = columns::Id;
}

impl ManyToMany<container::Entity> for Entity {
    const JOIN_TABLE: &'static str = "catalogs_containers";
    const LOCAL_COLUMN: &'static str = "catalog_id";
    const FOREIGN_COLUMN: &'static str = "container_id";

    type LocalKey = columns::Id;
    type ForeignKey = container::columns::Id;
}

impl ManyToMany<container_description_pattern::Entity> for Entity {
    const JOIN_TABLE: &'static str = "catalogs_container_description_patterns";
    const LOCAL_COLUMN: &'static str = "catalog_id";
    const FOREIGN_COLUMN: &'static str = "container_description_pattern_id";

    type LocalKey = columns::Id;
    type ForeignKey = container_description_pattern::columns::Id;
}

belongs_to!(Catalog {
    user: user via UserId [load = load_user, set = set_user, remove = remove_user];
    parent: catalog via ParentId [load = load_parent, set = set_parent, remove = remove_parent];
});

has_many!(Catalog {
    child_catalogs: catalog via ParentId [
        load = load_child_catalogs,
        add = add_child_catalogs,
        set = set_child_catalogs,
        remove = remove_child_catalogs
    ];
    catalog_descriptions: catalog_description via CatalogId [
        load = load_catalog_descriptions,
        add = add_catalog_descriptions
    ];
});

many_to_many!(Catalog {
    containers: container [
        load = load_containers,
        add = add_containers,
        set = set_containers,
        remove = remove_containers
    ];
    container_description_patterns: container_description_pattern [
        load = load_container_description_patterns,
        add = add_container_description_patterns,
        set = set_container_description_patterns,
        remove = remove_container_description_patterns
    ];
});
