//! Per-request persistence context over the `estudantes` table.
//!
//! Reads go straight to the pool. Writes are staged with [`StudentContext::add`] /
//! [`StudentContext::update`] and only reach the database on [`StudentContext::save`],
//! which applies them in a single transaction. A context dropped before `save` (for
//! example when the client disconnects) leaves the database untouched, and a `save`
//! interrupted before commit is rolled back when its transaction is dropped.

use crate::error::AppError;
use crate::store::STUDENTS_TABLE;
use crate::student::Student;
use sqlx::SqlitePool;
use uuid::Uuid;

const COLUMNS: &str = "id, name, active";

#[derive(Clone, Debug)]
enum Pending {
    Insert(Student),
    Update(Student),
}

pub struct StudentContext {
    pool: SqlitePool,
    pending: Vec<Pending>,
}

impl StudentContext {
    pub fn new(pool: SqlitePool) -> Self {
        StudentContext {
            pool,
            pending: Vec::new(),
        }
    }

    /// All active students. No ordering guarantee.
    pub async fn query_active(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT {} FROM {} WHERE active = 1", COLUMNS, STUDENTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_active_by_id(&self, id: Uuid) -> Result<Option<Student>, AppError> {
        self.find_single(id, true).await
    }

    /// Lookup by id regardless of `active`.
    pub async fn find_any_by_id(&self, id: Uuid) -> Result<Option<Student>, AppError> {
        self.find_single(id, false).await
    }

    /// True if any student, active or not, has exactly this name.
    pub async fn exists_by_name(&self, name: &str) -> Result<bool, AppError> {
        let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE name = ?)", STUDENTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(name)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    pub fn add(&mut self, student: &Student) {
        self.pending.push(Pending::Insert(student.clone()));
    }

    /// Stage the current state of a loaded student for write-back.
    pub fn update(&mut self, student: &Student) {
        self.pending.push(Pending::Update(student.clone()));
    }

    pub fn has_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Flush staged changes in one transaction. Returns the number of rows written.
    /// Staged changes are kept if the flush fails.
    pub async fn save(&mut self) -> Result<u64, AppError> {
        if self.pending.is_empty() {
            return Ok(0);
        }
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES (?, ?, ?)",
            STUDENTS_TABLE, COLUMNS
        );
        let update_sql = format!("UPDATE {} SET name = ?, active = ? WHERE id = ?", STUDENTS_TABLE);

        let mut tx = self.pool.begin().await?;
        let mut written = 0u64;
        for change in &self.pending {
            let result = match change {
                Pending::Insert(s) => {
                    tracing::debug!(sql = %insert_sql, id = %s.id(), "query (tx)");
                    sqlx::query(&insert_sql)
                        .bind(s.id().to_string())
                        .bind(s.name())
                        .bind(s.is_active())
                        .execute(&mut *tx)
                        .await?
                }
                Pending::Update(s) => {
                    tracing::debug!(sql = %update_sql, id = %s.id(), "query (tx)");
                    sqlx::query(&update_sql)
                        .bind(s.name())
                        .bind(s.is_active())
                        .bind(s.id().to_string())
                        .execute(&mut *tx)
                        .await?
                }
            };
            if result.rows_affected() == 0 {
                tracing::warn!(change = ?change, "staged change matched no row");
            }
            written += result.rows_affected();
        }
        tx.commit().await?;
        self.pending.clear();
        Ok(written)
    }

    async fn find_single(&self, id: Uuid, active_only: bool) -> Result<Option<Student>, AppError> {
        let filter = if active_only { " AND active = 1" } else { "" };
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ?{} LIMIT 2",
            COLUMNS, STUDENTS_TABLE, filter
        );
        tracing::debug!(sql = %sql, id = %id, "query");
        let mut rows = sqlx::query_as::<_, Student>(&sql)
            .bind(id.to_string())
            .fetch_all(&self.pool)
            .await?;
        if rows.len() > 1 {
            return Err(AppError::Invariant(format!(
                "more than one {} row with id {}",
                STUDENTS_TABLE, id
            )));
        }
        Ok(rows.pop())
    }
}
