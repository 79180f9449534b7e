//! Brings the traits needed to query and write models into scope.
//!
//! ```ignore
//! use kmedia::prelude::*;
//! ```

pub use crate::entity::{
    Entity as _,
    column::{
        Column as _, ComparableColumn as _, NullableColumn as _, RangeColumn as _,
        StringComparableColumn as _,
    },
    model::{Collection as _, Model as _, Upsert},
};
pub use crate::query::{assign::Assignments, select::Order};
