use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::Related};

use super::{catalog, language};

/// The localized name of a catalog.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "catalog_descriptions")]
pub struct CatalogDescription {
    #[kmedia(primary_key, default)]
    pub id: i32,
    #[kmedia(default)]
    pub catalog_id: i32,
    pub name: Option<String>,
    pub lang_id: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,

    #[kmedia(skip)]
    pub r: CatalogDescriptionRelations,
}

#[derive(Debug, Clone, Default)]
pub struct CatalogDescriptionRelations {
    pub catalog: Option<Box<catalog::Catalog>>,
    pub lang: Option<Box<language::Language>>,
}

impl Related<catalog::Entity, columns::CatalogId> for Entity {
    type TargetColumn = catalog::columns::Id;
}

impl Related<language::Entity, columns::LangId> for Entity {
    type TargetColumn = language::columns::Code3;
}

belongs_to!(CatalogDescription {
    catalog: catalog via CatalogId [load = load_catalog, set = set_catalog];
    lang: language via LangId [load = load_lang, set = set_lang, remove = remove_lang];
});
