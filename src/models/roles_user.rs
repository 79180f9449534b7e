use crate::{DatabaseModel, entity::relation::Related};

use super::user;

/// Grants a role to a user. Keyed by both columns.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "roles_users")]
pub struct RolesUser {
    #[kmedia(primary_key)]
    pub role_id: i32,
    #[kmedia(primary_key)]
    pub user_id: i32,

    #[kmedia(skip)]
    pub r: RolesUserRelations,
}

#[derive(Debug, Clone, Default)]
pub struct RolesUserRelations {
    pub user: Option<Box<user::User>>,
}

impl Related<user::Entity, columns::UserId> for Entity {
    type TargetColumn = user::columns::Id;
}

belongs_to!(RolesUser {
    user: user via UserId [load = load_user, set = set_user];
});
