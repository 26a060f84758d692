//! `SeaORM` Entity for progress_records table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "progress_records"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: Uuid,
    pub mentor_id: Uuid,
    pub mentee_id: Uuid,
    pub meeting_date: Date,
    pub key_topics_discussed: String,
    pub mentee_action_items: String,
    pub mentor_action_items: String,
    pub milestones_wins: String,
    pub key_insights: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    MentorId,
    MenteeId,
    MeetingDate,
    KeyTopicsDiscussed,
    MenteeActionItems,
    MentorActionItems,
    MilestonesWins,
    KeyInsights,
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
    Mentee,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Uuid.def(),
            Self::MentorId => ColumnType::Uuid.def(),
            Self::MenteeId => ColumnType::Uuid.def(),
            Self::MeetingDate => ColumnType::Date.def(),
            Self::KeyTopicsDiscussed => ColumnType::Text.def(),
            Self::MenteeActionItems => ColumnType::Text.def(),
            Self::MentorActionItems => ColumnType::Text.def(),
            Self::MilestonesWins => ColumnType::Text.def(),
            Self::KeyInsights => ColumnType::Text.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Mentee => Entity::belongs_to(super::profile::Entity)
                .from(Column::MenteeId)
                .to(super::profile::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
