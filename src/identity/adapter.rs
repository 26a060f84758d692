use std::sync::Mutex;

use tokio::sync::{Mutex as AsyncMutex, MutexGuard};
use uuid::Uuid;

use crate::config::{APP_CONFIG, SESSION_TTL_SECONDS};
use crate::entities::profile;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::error::{ServiceError, ServiceResult, map_db_error};
use crate::identity::{Session, login_address};
use crate::repositories::{ProfileRepository, ProfileUpdate};
use crate::utils::jwt::JwtManager;

pub struct IdentityAdapter {
    jwt: JwtManager,
    /// The one active session. Reads and writes are short and
    /// synchronous; never held across an await.
    slot: Mutex<Option<Session>>,
    /// Serializes session-switching operations. Every facade operation
    /// that writes the slot (sign_in, register_mentor, register_admin,
    /// add_mentee and each bulk-import row) holds this for its whole
    /// critical section so no switcher can observe, or clobber, another
    /// switcher's snapshot-and-restore window.
    switch_lock: AsyncMutex<()>,
}

impl IdentityAdapter {
    pub fn new() -> Self {
        Self {
            jwt: JwtManager::new(APP_CONFIG.jwt_secret.clone()),
            slot: Mutex::new(None),
            switch_lock: AsyncMutex::new(()),
        }
    }

    pub async fn lock_switches(&self) -> MutexGuard<'_, ()> {
        self.switch_lock.lock().await
    }

    pub fn current_session(&self) -> Option<Session> {
        self.slot.lock().expect("session slot poisoned").clone()
    }

    fn store_session(&self, session: Option<Session>) {
        *self.slot.lock().expect("session slot poisoned") = session;
    }

    fn issue_session(&self, profile: &profile::Model) -> ServiceResult<Session> {
        let token = self.jwt.create_token(
            &profile.id.to_string(),
            &profile.username,
            profile.role,
            SESSION_TTL_SECONDS,
        )?;
        Ok(Session {
            user_id: profile.id,
            username: profile.username.clone(),
            role: profile.role,
            access_token: token,
        })
    }

    /// Creates the identity record and activates a session as it,
    /// displacing the current one. Callers that must stay authenticated
    /// as someone else snapshot and restore around this call.
    pub async fn sign_up(
        &self,
        username: &str,
        password: &str,
        role: RoleEnum,
    ) -> ServiceResult<profile::Model> {
        let repo = ProfileRepository::new();
        let hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
            .map_err(|e| ServiceError::Internal(e.into()))?;

        let created = repo
            .create(
                Uuid::new_v4(),
                username.to_string(),
                String::new(),
                role,
                hash,
            )
            .await
            .map_err(|e| {
                map_db_error(e, "This username is already taken. Please choose another one.")
            })?;

        tracing::info!(
            address = %login_address(username),
            role = ?role,
            "identity created"
        );

        let session = self.issue_session(&created)?;
        self.store_session(Some(session));

        Ok(created)
    }

    pub async fn sign_in(&self, username: &str, password: &str) -> ServiceResult<profile::Model> {
        let repo = ProfileRepository::new();
        let profile = repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| ServiceError::validation("Invalid login credentials"))?;

        let valid = bcrypt::verify(password, &profile.password)
            .map_err(|e| ServiceError::Internal(e.into()))?;
        if !valid {
            return Err(ServiceError::validation("Invalid login credentials"));
        }

        let session = self.issue_session(&profile)?;
        self.store_session(Some(session));

        tracing::info!(address = %login_address(username), "signed in");
        Ok(profile)
    }

    /// Idempotent: clearing an already-empty slot is success.
    pub fn sign_out(&self) {
        self.store_session(None);
    }

    /// Session restoration. The snapshot's token is re-verified; a
    /// token that expired or no longer validates cannot be restored and
    /// the slot is left untouched.
    pub fn set_session(&self, session: Session) -> ServiceResult<()> {
        if self.jwt.verify_token(&session.access_token).is_err() {
            return Err(ServiceError::SessionIntegrity);
        }
        self.store_session(Some(session));
        Ok(())
    }

    /// Changes the password of whoever owns the active session. There
    /// is no re-authentication with the old password in this design.
    pub async fn update_password(&self, new_password: &str) -> ServiceResult<()> {
        let session = self
            .current_session()
            .ok_or_else(|| ServiceError::validation("No active session"))?;

        let hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| ServiceError::Internal(e.into()))?;

        ProfileRepository::new()
            .update(
                session.user_id,
                ProfileUpdate {
                    password: Some(hash),
                    ..Default::default()
                },
            )
            .await?;
        Ok(())
    }

    /// Privileged reset by id, independent of the active session.
    pub async fn admin_reset_password(
        &self,
        user_id: Uuid,
        new_password: &str,
    ) -> ServiceResult<()> {
        let hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST)
            .map_err(|e| ServiceError::Internal(e.into()))?;

        ProfileRepository::new()
            .update(
                user_id,
                ProfileUpdate {
                    password: Some(hash),
                    ..Default::default()
                },
            )
            .await
            .map_err(|e| {
                if e.to_string().contains("not found") {
                    ServiceError::not_found("User not found")
                } else {
                    ServiceError::Internal(e)
                }
            })?;
        Ok(())
    }
}

impl Default for IdentityAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::JwtManager;

    fn adapter_with_secret(secret: &str) -> IdentityAdapter {
        IdentityAdapter {
            jwt: JwtManager::new(secret),
            slot: Mutex::new(None),
            switch_lock: AsyncMutex::new(()),
        }
    }

    fn session_for(adapter_secret: &str, ttl: i64) -> Session {
        let token = JwtManager::new(adapter_secret)
            .create_token("6f2f5e49-0000-0000-0000-000000000000", "mentor1", RoleEnum::Mentor, ttl)
            .unwrap();
        Session {
            user_id: "6f2f5e49-0000-0000-0000-000000000000".parse().unwrap(),
            username: "mentor1".to_string(),
            role: RoleEnum::Mentor,
            access_token: token,
        }
    }

    #[test]
    fn sign_out_is_idempotent() {
        let adapter = adapter_with_secret("s");
        adapter.sign_out();
        adapter.sign_out();
        assert!(adapter.current_session().is_none());
    }

    #[test]
    fn restore_accepts_valid_snapshot() {
        let adapter = adapter_with_secret("s");
        let snapshot = session_for("s", 3600);
        adapter.set_session(snapshot.clone()).unwrap();

        let current = adapter.current_session().unwrap();
        assert_eq!(current.user_id, snapshot.user_id);
        assert_eq!(current.username, "mentor1");
    }

    #[tokio::test]
    async fn switch_lock_serializes_slot_writers() {
        use std::sync::Arc;

        let adapter = Arc::new(adapter_with_secret("s"));
        let guard = adapter.lock_switches().await;

        // A second switcher queues behind the critical section instead
        // of interleaving with the snapshot-and-restore window.
        let contender = {
            let adapter = Arc::clone(&adapter);
            tokio::spawn(async move {
                let _g = adapter.lock_switches().await;
                adapter.sign_out();
            })
        };

        let snapshot = session_for("s", 3600);
        adapter.set_session(snapshot.clone()).unwrap();
        tokio::task::yield_now().await;
        let mid = adapter.current_session().unwrap();
        assert_eq!(mid.user_id, snapshot.user_id);

        drop(guard);
        contender.await.unwrap();
        assert!(adapter.current_session().is_none());
    }

    #[test]
    fn restore_rejects_expired_snapshot() {
        let adapter = adapter_with_secret("s");
        let stale = session_for("s", -120);
        match adapter.set_session(stale) {
            Err(ServiceError::SessionIntegrity) => {}
            other => panic!("expected session-integrity error, got {other:?}"),
        }
        assert!(adapter.current_session().is_none());
    }

    #[test]
    fn restore_rejects_foreign_token() {
        let adapter = adapter_with_secret("s");
        let forged = session_for("other-secret", 3600);
        assert!(matches!(
            adapter.set_session(forged),
            Err(ServiceError::SessionIntegrity)
        ));
    }
}
