use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::school::errors::SchoolError;
use crate::school::models::NewSchool;
use crate::school::models::School;
use crate::school::models::SchoolId;
use crate::school::models::SchoolName;
use crate::school::ports::SchoolRepository;

pub(crate) const SCHOOLS_NAME_KEY: &str = "schools_name_key";

pub struct PostgresSchoolRepository {
    pool: PgPool,
}

impl PostgresSchoolRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SchoolRow {
    id: i64,
    name: String,
    address: String,
    password_hash: String,
    verified: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<SchoolRow> for School {
    type Error = SchoolError;

    fn try_from(r: SchoolRow) -> Result<Self, Self::Error> {
        Ok(School {
            id: SchoolId(r.id),
            name: SchoolName::new(r.name)?,
            address: r.address,
            password_hash: r.password_hash,
            verified: r.verified,
            created_at: r.created_at,
        })
    }
}

/// Maps a unique violation on the name constraint to `DuplicateName`.
pub(crate) fn map_name_conflict(e: sqlx::Error, name: &SchoolName) -> SchoolError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() && db_err.constraint() == Some(SCHOOLS_NAME_KEY) {
            return SchoolError::DuplicateName(name.to_string());
        }
    }
    database_error(e)
}

pub(crate) fn database_error(e: sqlx::Error) -> SchoolError {
    tracing::error!(error = %e, "Database operation failed");
    SchoolError::DatabaseError(e.to_string())
}

#[async_trait]
impl SchoolRepository for PostgresSchoolRepository {
    async fn create(&self, school: NewSchool) -> Result<School, SchoolError> {
        let row = sqlx::query_as::<_, SchoolRow>(
            r#"
            INSERT INTO schools (name, address, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, address, password_hash, verified, created_at
            "#,
        )
        .bind(school.name.as_str())
        .bind(&school.address)
        .bind(&school.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_name_conflict(e, &school.name))?;

        row.try_into()
    }

    async fn find_by_id(&self, id: SchoolId) -> Result<Option<School>, SchoolError> {
        sqlx::query_as::<_, SchoolRow>(
            r#"
            SELECT id, name, address, password_hash, verified, created_at
            FROM schools
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(School::try_from)
        .transpose()
    }

    async fn find_by_name(&self, name: &SchoolName) -> Result<Option<School>, SchoolError> {
        sqlx::query_as::<_, SchoolRow>(
            r#"
            SELECT id, name, address, password_hash, verified, created_at
            FROM schools
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?
        .map(School::try_from)
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<School>, SchoolError> {
        let rows = sqlx::query_as::<_, SchoolRow>(
            r#"
            SELECT id, name, address, password_hash, verified, created_at
            FROM schools
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(School::try_from).collect()
    }

    async fn set_verified(&self, id: SchoolId, verified: bool) -> Result<(), SchoolError> {
        let result = sqlx::query(
            r#"
            UPDATE schools
            SET verified = $2
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(verified)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(SchoolError::NotFound(id));
        }

        Ok(())
    }

    async fn delete(&self, id: SchoolId) -> Result<(), SchoolError> {
        let result = sqlx::query(
            r#"
            DELETE FROM schools
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(SchoolError::NotFound(id));
        }

        Ok(())
    }
}
