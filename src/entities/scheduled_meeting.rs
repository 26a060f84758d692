//! `SeaORM` Entity for scheduled_meetings table

use sea_orm::{entity::prelude::*, sea_query::RcOrArc, sea_query::StringLen};
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::{MeetingType, ScheduledStatus};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "scheduled_meetings"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_ids: Vec<Uuid>,
    pub r#type: MeetingType,
    pub date: Date,
    /// Free-form "HH:MM" text, kept as entered.
    pub time: String,
    pub agenda: String,
    pub status: ScheduledStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    MentorId,
    MenteeIds,
    Type,
    Date,
    Time,
    Agenda,
    Status,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = Uuid;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Mentor,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::MentorId => ColumnType::Uuid.def(),
            Self::MenteeIds => ColumnType::Array(RcOrArc::new(ColumnType::Uuid)).def(),
            Self::Type => MeetingType::db_type(),
            Self::Date => ColumnType::Date.def(),
            Self::Time => ColumnType::String(StringLen::None).def(),
            Self::Agenda => ColumnType::Text.def(),
            Self::Status => ScheduledStatus::db_type(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Mentor => Entity::belongs_to(super::profile::Entity)
                .from(Column::MentorId)
                .to(super::profile::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
