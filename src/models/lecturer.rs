use chrono::NaiveDateTime;

use crate::DatabaseModel;

use super::{container, lecturer_description};

#[derive(DatabaseModel, Debug, Clone, Default)]
#[kmedia(table = "lecturers")]
pub struct Lecturer {
    #[kmedia(primary_key, default)]
    pub id: i32,
    #[kmedia(default)]
    pub name: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
    #[kmedia(default)]
    pub ordnum: i32,

    #[kmedia(skip)]
    pub r: LecturerRelations,
}

#[derive(Debug, Clone, Default)]
pub struct LecturerRelations {
    pub lecturer_descriptions: Vec<lecturer_description::LecturerDescription>,
    pub containers: Vec<container::Container>,
}

has_many!(Lecturer {
    lecturer_descriptions: lecturer_description via LecturerId [
        load = load_lecturer_descriptions,
        add = add_lecturer_descriptions
    ];
    containers: container via LecturerId [
        load = load_containers,
        add = add_containers,
        set = set_containers,
        remove = remove_containers
    ];
});
