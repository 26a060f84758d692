use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::{
    assignment, assignment_mentee, feedback, meeting, mentee_data, message, points_log, profile,
    progress_record, scheduled_meeting, submission,
};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

pub struct ProfileRepository;

impl ProfileRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<profile::Model>> {
        let db = self.get_connection();
        let found = profile::Entity::find_by_id(id).one(db).await?;
        Ok(found)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<profile::Model>> {
        let db = self.get_connection();
        let found = profile::Entity::find()
            .filter(profile::Column::Username.eq(username))
            .one(db)
            .await?;
        Ok(found)
    }

    pub async fn find_all_by_role(&self, role: RoleEnum) -> Result<Vec<profile::Model>> {
        let db = self.get_connection();
        let found = profile::Entity::find()
            .filter(profile::Column::Role.eq(role))
            .order_by_asc(profile::Column::Name)
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn create(
        &self,
        id: Uuid,
        username: String,
        name: String,
        role: RoleEnum,
        password_hash: String,
    ) -> Result<profile::Model> {
        let db = self.get_connection();
        let now = chrono::Utc::now().naive_utc();
        let model = profile::ActiveModel {
            id: Set(id),
            username: Set(username),
            name: Set(name),
            role: Set(role),
            password: Set(password_hash),
            photo_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    pub async fn update(&self, id: Uuid, updates: ProfileUpdate) -> Result<profile::Model> {
        let profile = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Profile not found"))?;
        let db = self.get_connection();

        let mut active: profile::ActiveModel = profile.into();

        if let Some(name) = updates.name {
            active.name = Set(name);
        }
        if let Some(username) = updates.username {
            active.username = Set(username);
        }
        if let Some(photo_url) = updates.photo_url {
            active.photo_url = Set(Some(photo_url));
        }
        if let Some(password) = updates.password {
            active.password = Set(password);
        }

        active.updated_at = Set(chrono::Utc::now().naive_utc());

        let result = active.update(db).await?;
        Ok(result)
    }

    /// Privileged cascading delete. Removes the identity and every
    /// dependent row in one transaction; a mentor's mentees go with the
    /// mentor, since the mentor is their exclusive parent.
    pub async fn delete_user_cascade(&self, id: Uuid) -> Result<()> {
        let db = self.get_connection();
        let profile = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("User not found"))?;

        let txn = db.begin().await?;

        match profile.role {
            RoleEnum::Mentor => {
                let mentee_rows = mentee_data::Entity::find()
                    .filter(mentee_data::Column::MentorId.eq(id))
                    .all(&txn)
                    .await?;
                for row in &mentee_rows {
                    Self::delete_mentee_rows(&txn, row.profile_id).await?;
                    profile::Entity::delete_by_id(row.profile_id)
                        .exec(&txn)
                        .await?;
                }

                let assignments = assignment::Entity::find()
                    .filter(assignment::Column::MentorId.eq(id))
                    .all(&txn)
                    .await?;
                for a in &assignments {
                    submission::Entity::delete_many()
                        .filter(submission::Column::AssignmentId.eq(a.id))
                        .exec(&txn)
                        .await?;
                    assignment_mentee::Entity::delete_many()
                        .filter(assignment_mentee::Column::AssignmentId.eq(a.id))
                        .exec(&txn)
                        .await?;
                }
                assignment::Entity::delete_many()
                    .filter(assignment::Column::MentorId.eq(id))
                    .exec(&txn)
                    .await?;

                meeting::Entity::delete_many()
                    .filter(meeting::Column::MentorId.eq(id))
                    .exec(&txn)
                    .await?;
                scheduled_meeting::Entity::delete_many()
                    .filter(scheduled_meeting::Column::MentorId.eq(id))
                    .exec(&txn)
                    .await?;
                progress_record::Entity::delete_many()
                    .filter(progress_record::Column::MentorId.eq(id))
                    .exec(&txn)
                    .await?;
            }
            RoleEnum::Mentee => {
                Self::delete_mentee_rows(&txn, id).await?;
            }
            RoleEnum::Admin => {}
        }

        message::Entity::delete_many()
            .filter(
                message::Column::SenderId
                    .eq(id)
                    .or(message::Column::ReceiverId.eq(id.to_string())),
            )
            .exec(&txn)
            .await?;
        feedback::Entity::delete_many()
            .filter(feedback::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        profile::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn delete_mentee_rows(txn: &DatabaseTransaction, mentee_id: Uuid) -> Result<()> {
        submission::Entity::delete_many()
            .filter(submission::Column::MenteeId.eq(mentee_id))
            .exec(txn)
            .await?;
        assignment_mentee::Entity::delete_many()
            .filter(assignment_mentee::Column::MenteeId.eq(mentee_id))
            .exec(txn)
            .await?;
        points_log::Entity::delete_many()
            .filter(points_log::Column::MenteeId.eq(mentee_id))
            .exec(txn)
            .await?;
        progress_record::Entity::delete_many()
            .filter(progress_record::Column::MenteeId.eq(mentee_id))
            .exec(txn)
            .await?;
        meeting::Entity::delete_many()
            .filter(Expr::cust_with_values(
                "? = ANY(mentee_ids)",
                [mentee_id],
            ))
            .exec(txn)
            .await?;
        scheduled_meeting::Entity::delete_many()
            .filter(Expr::cust_with_values(
                "? = ANY(mentee_ids)",
                [mentee_id],
            ))
            .exec(txn)
            .await?;
        message::Entity::delete_many()
            .filter(
                message::Column::SenderId
                    .eq(mentee_id)
                    .or(message::Column::ReceiverId.eq(mentee_id.to_string())),
            )
            .exec(txn)
            .await?;
        mentee_data::Entity::delete_many()
            .filter(mentee_data::Column::ProfileId.eq(mentee_id))
            .exec(txn)
            .await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub photo_url: Option<String>,
    pub password: Option<String>,
}
