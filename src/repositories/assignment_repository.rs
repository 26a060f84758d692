use crate::entities::{assignment, assignment_mentee, submission};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

pub struct AssignmentRepository;

impl AssignmentRepository {
    pub fn new() -> Self {
        Self
    }

    pub fn get_connection(&self) -> &'static DatabaseConnection {
        DATABASE_CONNECTION
            .get()
            .expect("DATABASE_CONNECTION not set")
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<assignment::Model>> {
        let db = self.get_connection();
        let found = assignment::Entity::find_by_id(id).one(db).await?;
        Ok(found)
    }

    pub async fn create(
        &self,
        mentor_id: Uuid,
        title: String,
        instructions: String,
        due_date: NaiveDate,
    ) -> Result<assignment::Model> {
        let db = self.get_connection();
        let model = assignment::ActiveModel {
            id: Set(Uuid::new_v4()),
            mentor_id: Set(mentor_id),
            title: Set(title),
            instructions: Set(instructions),
            due_date: Set(due_date),
            created_at: Set(chrono::Utc::now().naive_utc()),
        };
        let result = model.insert(db).await?;
        Ok(result)
    }

    /// Inserted separately from the assignment row on purpose: a failure
    /// here leaves a zero-recipient assignment, which read paths return
    /// with an empty mentee list rather than hiding.
    pub async fn link_mentees(&self, assignment_id: Uuid, mentee_ids: &[Uuid]) -> Result<()> {
        if mentee_ids.is_empty() {
            return Ok(());
        }
        let db = self.get_connection();
        let links = mentee_ids.iter().map(|mentee_id| assignment_mentee::ActiveModel {
            assignment_id: Set(assignment_id),
            mentee_id: Set(*mentee_id),
        });
        assignment_mentee::Entity::insert_many(links).exec(db).await?;
        Ok(())
    }

    pub async fn linked_mentee_ids(&self, assignment_id: Uuid) -> Result<Vec<Uuid>> {
        let db = self.get_connection();
        let links = assignment_mentee::Entity::find()
            .filter(assignment_mentee::Column::AssignmentId.eq(assignment_id))
            .all(db)
            .await?;
        Ok(links.into_iter().map(|l| l.mentee_id).collect())
    }

    pub async fn is_mentee_linked(&self, assignment_id: Uuid, mentee_id: Uuid) -> Result<bool> {
        let db = self.get_connection();
        let link = assignment_mentee::Entity::find_by_id((assignment_id, mentee_id))
            .one(db)
            .await?;
        Ok(link.is_some())
    }

    pub async fn find_by_mentor(&self, mentor_id: Uuid) -> Result<Vec<assignment::Model>> {
        let db = self.get_connection();
        let found = assignment::Entity::find()
            .filter(assignment::Column::MentorId.eq(mentor_id))
            .order_by_desc(assignment::Column::DueDate)
            .all(db)
            .await?;
        Ok(found)
    }

    pub async fn find_by_mentee(&self, mentee_id: Uuid) -> Result<Vec<assignment::Model>> {
        let db = self.get_connection();
        let links = assignment_mentee::Entity::find()
            .filter(assignment_mentee::Column::MenteeId.eq(mentee_id))
            .all(db)
            .await?;
        let ids: Vec<Uuid> = links.into_iter().map(|l| l.assignment_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let found = assignment::Entity::find()
            .filter(assignment::Column::Id.is_in(ids))
            .order_by_desc(assignment::Column::DueDate)
            .all(db)
            .await?;
        Ok(found)
    }

    /// Deletes the assignment with its join rows and submissions, the
    /// store-level cascade the source relied on.
    pub async fn delete(&self, assignment_id: Uuid) -> Result<()> {
        let db = self.get_connection();
        let txn = db.begin().await?;

        submission::Entity::delete_many()
            .filter(submission::Column::AssignmentId.eq(assignment_id))
            .exec(&txn)
            .await?;
        assignment_mentee::Entity::delete_many()
            .filter(assignment_mentee::Column::AssignmentId.eq(assignment_id))
            .exec(&txn)
            .await?;
        assignment::Entity::delete_by_id(assignment_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(())
    }
}
