use chrono::NaiveDateTime;

use crate::DatabaseModel;

use super::user;

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "departments")]
pub struct Department {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub name: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,

    #[kmedia(skip)]
    pub r: DepartmentRelations,
}

#[derive(Debug, Clone, Default)]
pub struct DepartmentRelations {
    pub users: Vec<user::User>,
}

has_many!(Department {
    users: user via DepartmentId [
        load = load_users,
        add = add_users,
        set = set_users,
        remove = remove_users
    ];
});
