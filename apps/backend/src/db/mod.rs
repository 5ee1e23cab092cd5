//! PostgreSQL database operations

use sha2::{Digest, Sha256};
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

/// SHA-256 of a learner token, hex encoded.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Create a pool that connects on first use.
    pub fn connect_lazy(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Database(e.into()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Learner Repository ===

    /// Create a learner and return it with the plain token (shown once).
    pub async fn create_learner(&self, name: Option<&str>) -> Result<(Learner, String)> {
        let token = Uuid::new_v4().to_string();
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            INSERT INTO learners (token_hash, name)
            VALUES ($1, $2)
            RETURNING id, token_hash, name, created_at, last_seen_at
            "#,
        )
        .bind(hash_token(&token))
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok((learner, token))
    }

    /// Get learner by plain token
    pub async fn get_learner_by_token(&self, token: &str) -> Result<Option<Learner>> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, token_hash, name, created_at, last_seen_at
            FROM learners
            WHERE token_hash = $1
            "#,
        )
        .bind(hash_token(token))
        .fetch_optional(&self.pool)
        .await?;

        Ok(learner)
    }

    pub async fn get_learner(&self, learner_id: Uuid) -> Result<Option<Learner>> {
        let learner = sqlx::query_as::<_, Learner>(
            r#"
            SELECT id, token_hash, name, created_at, last_seen_at
            FROM learners
            WHERE id = $1
            "#,
        )
        .bind(learner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(learner)
    }

    /// Update learner last_seen_at timestamp
    pub async fn update_last_seen(&self, learner_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE learners
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(learner_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Used Question Repository ===

    /// Question ids already served to a learner in a lesson
    pub async fn get_used_question_ids(&self, learner_id: Uuid, lesson_id: &str) -> Result<Vec<String>> {
        let ids = sqlx::query_scalar::<_, String>(
            r#"
            SELECT question_id
            FROM used_questions
            WHERE learner_id = $1 AND lesson_id = $2
            ORDER BY used_at, question_id
            "#,
        )
        .bind(learner_id)
        .bind(lesson_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    pub async fn mark_question_used(
        &self,
        learner_id: Uuid,
        lesson_id: &str,
        question_id: &str,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO used_questions (learner_id, lesson_id, question_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (learner_id, lesson_id, question_id) DO UPDATE SET used_at = NOW()
            "#,
        )
        .bind(learner_id)
        .bind(lesson_id)
        .bind(question_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Forget served questions for a lesson; returns how many were cleared
    pub async fn clear_used_questions(&self, learner_id: Uuid, lesson_id: &str) -> Result<usize> {
        let result = sqlx::query(
            r#"
            DELETE FROM used_questions
            WHERE learner_id = $1 AND lesson_id = $2
            "#,
        )
        .bind(learner_id)
        .bind(lesson_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() as usize)
    }

    /// Clear a lesson and record one question in a single transaction
    pub async fn restart_rotation(
        &self,
        learner_id: Uuid,
        lesson_id: &str,
        question_id: &str,
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM used_questions WHERE learner_id = $1 AND lesson_id = $2")
            .bind(learner_id)
            .bind(lesson_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO used_questions (learner_id, lesson_id, question_id) VALUES ($1, $2, $3)",
        )
        .bind(learner_id)
        .bind(lesson_id)
        .bind(question_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    // === AI Question Repository ===

    pub async fn insert_ai_question(&self, question: &DbAiQuestion) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO ai_questions (id, lesson_id, learner_id, prompt, canonical_answer,
                                      accepted_answers, explanation, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&question.id)
        .bind(&question.lesson_id)
        .bind(question.learner_id)
        .bind(&question.prompt)
        .bind(&question.canonical_answer)
        .bind(&question.accepted_answers)
        .bind(&question.explanation)
        .bind(question.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_ai_question(&self, question_id: &str) -> Result<Option<DbAiQuestion>> {
        let question = sqlx::query_as::<_, DbAiQuestion>(
            r#"
            SELECT id, lesson_id, learner_id, prompt, canonical_answer,
                   accepted_answers, explanation, created_at
            FROM ai_questions
            WHERE id = $1
            "#,
        )
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    /// Most recent AI prompts for a lesson, newest last
    pub async fn recent_ai_prompts(&self, lesson_id: &str, limit: i64) -> Result<Vec<String>> {
        let mut prompts = sqlx::query_scalar::<_, String>(
            r#"
            SELECT prompt
            FROM ai_questions
            WHERE lesson_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(lesson_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        prompts.reverse();
        Ok(prompts)
    }

    // === Attempt Repository ===

    /// Log an attempt and fold it into the lesson progress in one transaction.
    ///
    /// The progress row is locked while it is updated so concurrent checks for
    /// the same lesson each count.
    pub async fn record_attempt(&self, attempt: &DbAttempt) -> Result<DbLessonProgress> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO attempts (id, learner_id, lesson_id, question_id, submitted_answer,
                                  is_correct, similarity, time_taken_ms, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(attempt.id)
        .bind(attempt.learner_id)
        .bind(&attempt.lesson_id)
        .bind(&attempt.question_id)
        .bind(&attempt.submitted_answer)
        .bind(attempt.is_correct)
        .bind(attempt.similarity)
        .bind(attempt.time_taken_ms)
        .bind(attempt.created_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO lesson_progress (learner_id, lesson_id)
            VALUES ($1, $2)
            ON CONFLICT (learner_id, lesson_id) DO NOTHING
            "#,
        )
        .bind(attempt.learner_id)
        .bind(&attempt.lesson_id)
        .execute(&mut *tx)
        .await?;

        let current = sqlx::query_as::<_, DbLessonProgress>(
            r#"
            SELECT learner_id, lesson_id, attempts, correct, current_streak,
                   best_streak, last_attempt_at
            FROM lesson_progress
            WHERE learner_id = $1 AND lesson_id = $2
            FOR UPDATE
            "#,
        )
        .bind(attempt.learner_id)
        .bind(&attempt.lesson_id)
        .fetch_one(&mut *tx)
        .await?;

        let mut progress = current.to_core();
        progress.record(attempt.is_correct, attempt.created_at);
        let updated = DbLessonProgress::from_core(attempt.learner_id, &progress);

        sqlx::query(
            r#"
            UPDATE lesson_progress SET
                attempts = $3,
                correct = $4,
                current_streak = $5,
                best_streak = $6,
                last_attempt_at = $7,
                updated_at = NOW()
            WHERE learner_id = $1 AND lesson_id = $2
            "#,
        )
        .bind(updated.learner_id)
        .bind(&updated.lesson_id)
        .bind(updated.attempts)
        .bind(updated.correct)
        .bind(updated.current_streak)
        .bind(updated.best_streak)
        .bind(updated.last_attempt_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    // === Progress Repository ===

    pub async fn get_lesson_progress(
        &self,
        learner_id: Uuid,
        lesson_id: &str,
    ) -> Result<Option<DbLessonProgress>> {
        let progress = sqlx::query_as::<_, DbLessonProgress>(
            r#"
            SELECT learner_id, lesson_id, attempts, correct, current_streak,
                   best_streak, last_attempt_at
            FROM lesson_progress
            WHERE learner_id = $1 AND lesson_id = $2
            "#,
        )
        .bind(learner_id)
        .bind(lesson_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(progress)
    }

    pub async fn get_all_progress(&self, learner_id: Uuid) -> Result<Vec<DbLessonProgress>> {
        let progress = sqlx::query_as::<_, DbLessonProgress>(
            r#"
            SELECT learner_id, lesson_id, attempts, correct, current_streak,
                   best_streak, last_attempt_at
            FROM lesson_progress
            WHERE learner_id = $1
            ORDER BY lesson_id
            "#,
        )
        .bind(learner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_hash_is_hex_sha256() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_ne!(hash_token("abc"), hash_token("abd"));
    }
}
