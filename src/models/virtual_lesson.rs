use chrono::NaiveDateTime;

use crate::{DatabaseModel, entity::relation::Related};

use super::{container, user};

/// Groups the containers recorded in one lesson.
#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "virtual_lessons")]
pub struct VirtualLesson {
    #[kmedia(primary_key, default)]
    pub id: i32,
    pub film_date: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub user_id: Option<i32>,

    #[kmedia(skip)]
    pub r: VirtualLessonRelations,
}

#[derive(Debug, Clone, Default)]
pub struct VirtualLessonRelations {
    pub user: Option<Box<user::User>>,
    pub containers: Vec<container::Container>,
}

impl Related<user::Entity, columns::UserId> for Entity {
    type TargetColumn = user::columns::Id;
}

belongs_to!(VirtualLesson {
    user: user via UserId [load = load_user, set = set_user, remove = remove_user];
});

has_many!(VirtualLesson {
    containers: container via VirtualLessonId [
        load = load_containers,
        add = add_containers,
        set = set_containers,
        remove = remove_containers
    ];
});
