use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use super::school::database_error;
use super::school::map_name_conflict;
use crate::school::errors::SchoolError;
use crate::school::models::ApplyEditCommand;
use crate::school::models::EditRequest;
use crate::school::models::EditRequestId;
use crate::school::models::RequestEditCommand;
use crate::school::models::SchoolId;
use crate::school::models::SchoolName;
use crate::school::ports::EditRequestRepository;

pub struct PostgresEditRequestRepository {
    pool: PgPool,
}

impl PostgresEditRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EditRequestRow {
    id: i64,
    school_id: i64,
    new_name: String,
    new_address: String,
    done: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<EditRequestRow> for EditRequest {
    type Error = SchoolError;

    fn try_from(r: EditRequestRow) -> Result<Self, Self::Error> {
        Ok(EditRequest {
            id: EditRequestId(r.id),
            school_id: SchoolId(r.school_id),
            new_name: SchoolName::new(r.new_name)?,
            new_address: r.new_address,
            done: r.done,
            created_at: r.created_at,
        })
    }
}

#[async_trait]
impl EditRequestRepository for PostgresEditRequestRepository {
    async fn create(&self, command: RequestEditCommand) -> Result<EditRequest, SchoolError> {
        let row = sqlx::query_as::<_, EditRequestRow>(
            r#"
            INSERT INTO edit_requests (school_id, new_name, new_address)
            VALUES ($1, $2, $3)
            RETURNING id, school_id, new_name, new_address, done, created_at
            "#,
        )
        .bind(command.school_id.0)
        .bind(command.new_name.as_str())
        .bind(&command.new_address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The token outlived the school it was issued for.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return SchoolError::NotFound(command.school_id);
                }
            }
            database_error(e)
        })?;

        row.try_into()
    }

    async fn list_all(&self) -> Result<Vec<EditRequest>, SchoolError> {
        let rows = sqlx::query_as::<_, EditRequestRow>(
            r#"
            SELECT id, school_id, new_name, new_address, done, created_at
            FROM edit_requests
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(EditRequest::try_from).collect()
    }

    async fn apply(&self, command: ApplyEditCommand) -> Result<(), SchoolError> {
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        let updated = sqlx::query(
            r#"
            UPDATE schools
            SET name = $2, address = $3
            WHERE id = $1
            "#,
        )
        .bind(command.school_id.0)
        .bind(command.new_name.as_str())
        .bind(&command.new_address)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_name_conflict(e, &command.new_name))?;

        if updated.rows_affected() == 0 {
            return Err(SchoolError::NotFound(command.school_id));
        }

        let marked = sqlx::query(
            r#"
            UPDATE edit_requests
            SET done = TRUE
            WHERE id = $1
            "#,
        )
        .bind(command.edit_request_id.0)
        .execute(&mut *tx)
        .await
        .map_err(database_error)?;

        if marked.rows_affected() == 0 {
            return Err(SchoolError::EditRequestNotFound(command.edit_request_id));
        }

        tx.commit().await.map_err(database_error)
    }

    async fn delete(&self, id: EditRequestId) -> Result<(), SchoolError> {
        let result = sqlx::query(
            r#"
            DELETE FROM edit_requests
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(SchoolError::EditRequestNotFound(id));
        }

        Ok(())
    }
}
