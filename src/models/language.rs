use crate::DatabaseModel;

use super::{
    catalog_description, container, container_description, container_description_pattern,
    container_transcript, dictionary_description, file_asset, file_asset_description,
    label_description, lecturer_description,
};

/// A language. Other tables refer to it through its three letter `code3`, not its id.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "languages")]
pub struct Language {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub locale: Option<String>,
    pub code3: Option<String>,
    pub language: Option<String>,

    #[kmedia(skip)]
    pub r: LanguageRelations,
}

#[derive(Debug, Clone, Default)]
pub struct LanguageRelations {
    pub catalog_descriptions: Vec<catalog_description::CatalogDescription>,
    pub container_description_patterns:
        Vec<container_description_pattern::ContainerDescriptionPattern>,
    pub container_descriptions: Vec<container_description::ContainerDescription>,
    pub container_transcripts: Vec<container_transcript::ContainerTranscript>,
    pub containers: Vec<container::Container>,
    pub dictionary_descriptions: Vec<dictionary_description::DictionaryDescription>,
    pub file_asset_descriptions: Vec<file_asset_description::FileAssetDescription>,
    pub file_assets: Vec<file_asset::FileAsset>,
    pub label_descriptions: Vec<label_description::LabelDescription>,
    pub lecturer_descriptions: Vec<lecturer_description::LecturerDescription>,
}

has_many!(Language {
    catalog_descriptions: catalog_description via LangId [
        load = load_catalog_descriptions,
        add = add_catalog_descriptions,
        set = set_catalog_descriptions,
        remove = remove_catalog_descriptions
    ];
    container_description_patterns: container_description_pattern via LangId [
        load = load_container_description_patterns,
        add = add_container_description_patterns,
        set = set_container_description_patterns,
        remove = remove_container_description_patterns
    ];
    container_descriptions: container_description via LangId [
        load = load_container_descriptions,
        add = add_container_descriptions,
        set = set_container_descriptions,
        remove = remove_container_descriptions
    ];
    container_transcripts: container_transcript via LangId [
        load = load_container_transcripts,
        add = add_container_transcripts,
        set = set_container_transcripts,
        remove = remove_container_transcripts
    ];
    containers: container via LangId [
        load = load_containers,
        add = add_containers,
        set = set_containers,
        remove = remove_containers
    ];
    dictionary_descriptions: dictionary_description via LangId [
        load = load_dictionary_descriptions,
        add = add_dictionary_descriptions,
        set = set_dictionary_descriptions,
        remove = remove_dictionary_descriptions
    ];
    file_asset_descriptions: file_asset_description via LangId [
        load = load_file_asset_descriptions,
        add = add_file_asset_descriptions,
        set = set_file_asset_descriptions,
        remove = remove_file_asset_descriptions
    ];
    file_assets: file_asset via LangId [
        load = load_file_assets,
        add = add_file_assets,
        set = set_file_assets,
        remove = remove_file_assets
    ];
    label_descriptions: label_description via LangId [
        load = load_label_descriptions,
        add = add_label_descriptions,
        set = set_label_descriptions,
        remove = remove_label_descriptions
    ];
    lecturer_descriptions: lecturer_description via LangId [
        load = load_lecturer_descriptions,
        add = add_lecturer_descriptions
    ];
});
