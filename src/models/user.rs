use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::Related};

use super::{
    catalog, container, container_description_pattern, department, file_asset, roles_user,
    virtual_lesson,
};

/// A back office account.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "users")]
pub struct User {
    #[kmedia(primary_key, default)]
    pub id: i32,
    #[kmedia(default)]
    pub email: String,
    #[kmedia(default)]
    pub encrypted_password: String,
    pub reset_password_token: Option<String>,
    pub remember_created_at: Option<NaiveDateTime>,
    #[kmedia(default)]
    pub sign_in_count: Option<i32>,
    pub current_sign_in_at: Option<NaiveDateTime>,
    pub last_sign_in_at: Option<NaiveDateTime>,
    pub current_sign_in_ip: Option<String>,
    pub last_sign_in_ip: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    #[kmedia(default)]
    pub first_name: Option<String>,
    #[kmedia(default)]
    pub last_name: Option<String>,
    pub authentication_token: Option<String>,
    pub reset_password_sent_at: Option<NaiveDateTime>,
    pub department_id: Option<i32>,

    #[kmedia(skip)]
    pub r: UserRelations,
}

#[derive(Debug, Clone, Default)]
pub struct UserRelations {
    pub department: Option<Box<department::Department>>,
    pub roles_users: Vec<roles_user::RolesUser>,
    pub container_description_patterns:
        Vec<container_description_pattern::ContainerDescriptionPattern>,
    pub catalogs: Vec<catalog::Catalog>,
    pub file_assets: Vec<file_asset::FileAsset>,
    pub virtual_lessons: Vec<virtual_lesson::VirtualLesson>,
    pub containers: Vec<container::Container>,
    pub censor_containers: Vec<container::Container>,
}

impl Related<department::Entity, columns::DepartmentId> for Entity {
    type TargetColumn = department::columns::Id;
}

belongs_to!(User {
    department: department via DepartmentId [
        load = load_department,
        set = set_department,
        remove = remove_department
    ];
});

has_many!(User {
    roles_users: roles_user via UserId [load = load_roles_users, add = add_roles_users];
    container_description_patterns: container_description_pattern via UserId [
        load = load_container_description_patterns,
        add = add_container_description_patterns,
        set = set_container_description_patterns,
        remove = remove_container_description_patterns
    ];
    catalogs: catalog via UserId [
        load = load_catalogs,
        add = add_catalogs,
        set = set_catalogs,
        remove = remove_catalogs
    ];
    file_assets: file_asset via UserId [
        load = load_file_assets,
        add = add_file_assets,
        set = set_file_assets,
        remove = remove_file_assets
    ];
    virtual_lessons: virtual_lesson via UserId [
        load = load_virtual_lessons,
        add = add_virtual_lessons,
        set = set_virtual_lessons,
        remove = remove_virtual_lessons
    ];
    containers: container via UserId [
        load = load_containers,
        add = add_containers,
        set = set_containers,
        remove = remove_containers
    ];
    censor_containers: container via CensorId [
        load = load_censor_containers,
        add = add_censor_containers,
        set = set_censor_containers,
        remove = remove_censor_containers
    ];
});
