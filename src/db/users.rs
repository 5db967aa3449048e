//! User queries.

use tracing::{debug, info};

use crate::db::{DatabasePool, User};
use crate::error::{DbError, query_failed};
use crate::models::NewUser;

impl DatabasePool {
    /// Gets a single user given their email.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_user_with_email(&self, email: &str) -> Result<Option<User>, DbError> {
        debug!(email, "fetching user by email");

        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(query_failed("get_user_with_email"))
    }

    /// Gets a single user given their id.
    ///
    /// # Errors
    /// Returns an error if the query fails.
    pub async fn get_user_with_id(&self, id: i32) -> Result<Option<User>, DbError> {
        debug!(id, "fetching user by id");

        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await
        .map_err(query_failed("get_user_with_id"))
    }

    /// Adds a new user and returns the stored row.
    ///
    /// # Errors
    /// Returns [`DbError::Conflict`] if the email is already registered.
    pub async fn add_user(&self, user: &NewUser) -> Result<User, DbError> {
        let created = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .fetch_one(self.pool())
        .await
        .map_err(query_failed("add_user"))?;

        info!(user_id = created.id, "user created");
        Ok(created)
    }
}
