//! `SeaORM` Entity for submissions table
//!
//! Keyed by (assignment_id, mentee_id). No row means the submission is
//! still Pending; a row is only materialized on the first transition.

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::SubmissionStatus;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "submissions"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    pub assignment_id: Uuid,
    pub mentee_id: Uuid,
    pub file_url: Option<String>,
    pub submitted_at: DateTime,
    pub status: SubmissionStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    AssignmentId,
    MenteeId,
    FileUrl,
    SubmittedAt,
    Status,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    AssignmentId,
    MenteeId,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = (Uuid, Uuid);
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Assignment,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::AssignmentId => ColumnType::Uuid.def(),
            Self::MenteeId => ColumnType::Uuid.def(),
            Self::FileUrl => ColumnType::String(StringLen::None).def().null(),
            Self::SubmittedAt => ColumnType::DateTime.def(),
            Self::Status => SubmissionStatus::db_type(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Assignment => Entity::belongs_to(super::assignment::Entity)
                .from(Column::AssignmentId)
                .to(super::assignment::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
