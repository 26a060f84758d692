//! `SeaORM` Entity for mentees_data table
//!
//! Role extension row for MENTEE profiles. A MENTEE profile without this
//! row is an incomplete mentee (creation was interrupted after the
//! identity step); read paths must tolerate that state.

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "mentees_data"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub profile_id: Uuid,
    pub mentor_id: Uuid,
    pub adno: String,
    pub class: String,
    pub photo_url: Option<String>,
    pub points: i32,
    pub is_coordinator: bool,
    pub personal_details: Option<Value>,
    pub academic_details: Option<Value>,
    pub mentorship_details: Option<Value>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    ProfileId,
    MentorId,
    Adno,
    Class,
    PhotoUrl,
    Points,
    IsCoordinator,
    PersonalDetails,
    AcademicDetails,
    MentorshipDetails,
    CreatedAt,
    UpdatedAt,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    ProfileId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Profile,
    Mentor,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::ProfileId => ColumnType::Uuid.def(),
            Self::MentorId => ColumnType::Uuid.def(),
            Self::Adno => ColumnType::String(StringLen::None).def(),
            Self::Class => ColumnType::String(StringLen::None).def(),
            Self::PhotoUrl => ColumnType::String(StringLen::None).def().null(),
            Self::Points => ColumnType::Integer.def(),
            Self::IsCoordinator => ColumnType::Boolean.def(),
            Self::PersonalDetails => ColumnType::Json.def().null(),
            Self::AcademicDetails => ColumnType::Json.def().null(),
            Self::MentorshipDetails => ColumnType::Json.def().null(),
            Self::CreatedAt => ColumnType::DateTime.def(),
            Self::UpdatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Profile => Entity::belongs_to(super::profile::Entity)
                .from(Column::ProfileId)
                .to(super::profile::Column::Id)
                .into(),
            Self::Mentor => Entity::belongs_to(super::profile::Entity)
                .from(Column::MentorId)
                .to(super::profile::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
