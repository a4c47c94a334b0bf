//! User repository. Users are only referenced by the core as move actors;
//! credentials stay with the auth collaborator and are stored as an opaque
//! reference.

use steward_core::entities::User;
use steward_core::enums::{AuditAction, EntityType, UserRole};
use steward_core::errors::require_non_empty;
use steward_core::ids::PREFIX_USER;

use crate::error::DatabaseError;
use crate::generate_id_on;
use crate::helpers::{parse_datetime, parse_enum};
use crate::repos::audit::{AuditRecord, append_audit};
use crate::service::StewardService;

const SELECT_COLS: &str = "id, username, role, credential_ref, created_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        role: parse_enum(&row.get::<String>(2)?)?,
        credential_ref: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
    })
}

async fn fetch_user_by(
    conn: &libsql::Connection,
    column: &str,
    value: &str,
) -> Result<Option<User>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM users WHERE {column} = ?1"),
            [value],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

async fn insert_user(conn: &libsql::Connection, mut user: User) -> Result<User, DatabaseError> {
    if fetch_user_by(conn, "username", &user.username).await?.is_some() {
        return Err(DatabaseError::Conflict(format!(
            "username '{}' is already taken",
            user.username
        )));
    }
    user.id = generate_id_on(conn, PREFIX_USER).await?;
    conn.execute(
        &format!("INSERT INTO users ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5)"),
        libsql::params![
            user.id.as_str(),
            user.username.as_str(),
            user.role.as_str(),
            user.credential_ref.as_str(),
            user.created_at.to_rfc3339()
        ],
    )
    .await?;
    append_audit(
        conn,
        AuditRecord {
            entity_type: EntityType::User,
            entity_id: &user.id,
            action: AuditAction::Created,
            actor_id: None,
            detail: Some(serde_json::json!({ "role": user.role })),
            at: user.created_at,
        },
    )
    .await?;
    Ok(user)
}

impl StewardService {
    /// # Errors
    ///
    /// `Validation` when `username` or `credential_ref` is blank, `Conflict`
    /// when the username is taken.
    pub async fn create_user(
        &self,
        username: &str,
        role: UserRole,
        credential_ref: &str,
    ) -> Result<User, DatabaseError> {
        require_non_empty("username", username)?;
        require_non_empty("credential_ref", credential_ref)?;
        let user = User {
            id: String::new(),
            username: username.trim().to_string(),
            role,
            credential_ref: credential_ref.to_string(),
            created_at: self.now(),
        };
        let tx = self.db().begin_write().await?;
        let result = insert_user(&tx, user).await;
        let user = Self::finish(tx, result).await?;
        tracing::debug!(user_id = %user.id, role = %user.role, "created user");
        Ok(user)
    }

    /// # Errors
    ///
    /// `NotFound` when the user does not exist.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let _read = self.db().read_guard().await;
        fetch_user_by(self.db().conn(), "id", id)
            .await?
            .ok_or_else(|| DatabaseError::not_found(EntityType::User, id))
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, DatabaseError> {
        let _read = self.db().read_guard().await;
        fetch_user_by(self.db().conn(), "username", username.trim()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use pretty_assertions::assert_eq;
    use steward_core::errors::ErrorKind;

    #[tokio::test]
    async fn create_and_look_up_user() {
        let svc = test_service().await;
        let user = svc
            .create_user("foreman1", UserRole::Foreman, "vault:users/foreman1")
            .await
            .unwrap();
        assert!(user.id.starts_with("usr-"));

        let by_id = svc.get_user(&user.id).await.unwrap();
        assert_eq!(by_id, user);
        let by_name = svc.find_user_by_username("foreman1").await.unwrap();
        assert_eq!(by_name, Some(user));
        assert_eq!(svc.find_user_by_username("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let svc = test_service().await;
        svc.create_user("admin", UserRole::Admin, "vault:a").await.unwrap();
        let err = svc
            .create_user("admin", UserRole::Foreman, "vault:b")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let svc = test_service().await;
        let err = svc.get_user("usr-00000000").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn blank_credential_is_rejected() {
        let svc = test_service().await;
        let err = svc.create_user("x", UserRole::Admin, "").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
