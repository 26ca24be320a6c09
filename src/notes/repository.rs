use sqlx::PgPool;

use crate::notes::Note;

/// Repository for database operations on notes
///
/// Every read and write except `create` filters on both the note id and the
/// owner, so another user's note behaves exactly like a missing one.
#[derive(Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    /// Create a new NoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All notes owned by `userid`, oldest first
    pub async fn list_for_owner(&self, userid: i32) -> Result<Vec<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, note, completed, userid
            FROM notes
            WHERE userid = $1
            ORDER BY id
            "#,
        )
        .bind(userid)
        .fetch_all(&self.pool)
        .await
    }

    /// A single note, only if owned by `userid`
    pub async fn find_for_owner(&self, id: i32, userid: i32) -> Result<Option<Note>, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            SELECT id, note, completed, userid
            FROM notes
            WHERE id = $1 AND userid = $2
            "#,
        )
        .bind(id)
        .bind(userid)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert a note owned by `userid`
    pub async fn create(&self, userid: i32, text: &str) -> Result<Note, sqlx::Error> {
        sqlx::query_as::<_, Note>(
            r#"
            INSERT INTO notes (note, userid)
            VALUES ($1, $2)
            RETURNING id, note, completed, userid
            "#,
        )
        .bind(text)
        .bind(userid)
        .fetch_one(&self.pool)
        .await
    }

    /// Set the completed flag; returns the number of rows touched (0 or 1)
    pub async fn set_completed(
        &self,
        id: i32,
        userid: i32,
        completed: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE notes SET completed = $1 WHERE id = $2 AND userid = $3")
            .bind(completed)
            .bind(id)
            .bind(userid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete a note; returns the number of rows removed (0 or 1)
    pub async fn delete_for_owner(&self, id: i32, userid: i32) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND userid = $2")
            .bind(id)
            .bind(userid)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
