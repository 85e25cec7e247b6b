//! `PostgreSQL` repository implementation for reviews.

use super::{models::ReviewRow, schema::reviews};
use crate::engagement::{adapters::postgres::EngagementPgPool, domain::JobId};
use crate::identity::domain::UserId;
use crate::rating::{
    domain::{PersistedReviewData, RaterRole, Rating, Review, ReviewId},
    ports::{ReviewRepository, ReviewRepositoryError, ReviewRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL`-backed review repository sharing the engagement pool.
#[derive(Debug, Clone)]
pub struct PostgresReviewRepository {
    pool: EngagementPgPool,
}

#[derive(Debug, QueryableByName)]
struct SequenceValue {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    value: i64,
}

impl PostgresReviewRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: EngagementPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ReviewRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ReviewRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ReviewRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ReviewRepositoryError::persistence)?
    }
}

#[async_trait]
impl ReviewRepository for PostgresReviewRepository {
    async fn next_review_id(&self) -> ReviewRepositoryResult<ReviewId> {
        self.run_blocking(|connection| {
            let row = diesel::sql_query("SELECT nextval('reviews_id_seq') AS value")
                .get_result::<SequenceValue>(connection)
                .map_err(ReviewRepositoryError::persistence)?;
            Ok(ReviewId::new(row.value))
        })
        .await
    }

    async fn store(&self, review: &Review) -> ReviewRepositoryResult<()> {
        let row = to_row(review);
        let (job_id, rater_id, ratee_id) = (review.job_id(), review.rater_id(), review.ratee_id());
        self.run_blocking(move |connection| {
            diesel::insert_into(reviews::table)
                .values(&row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_triple_unique_violation(info.as_ref()) =>
                    {
                        ReviewRepositoryError::DuplicateReview {
                            job_id,
                            rater_id,
                            ratee_id,
                        }
                    }
                    _ => ReviewRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn save_edit(&self, review: &Review) -> ReviewRepositoryResult<()> {
        let row = to_row(review);
        let review_id = review.id();
        self.run_blocking(move |connection| {
            let updated = diesel::update(
                reviews::table
                    .filter(reviews::id.eq(row.id))
                    .filter(reviews::edited.eq(false)),
            )
            .set((
                reviews::rating.eq(row.rating),
                reviews::comment.eq(row.comment),
                reviews::edited.eq(true),
                reviews::updated_at.eq(row.updated_at),
            ))
            .execute(connection)
            .map_err(ReviewRepositoryError::persistence)?;
            if updated > 0 {
                return Ok(());
            }
            let exists: i64 = reviews::table
                .filter(reviews::id.eq(row.id))
                .count()
                .get_result(connection)
                .map_err(ReviewRepositoryError::persistence)?;
            Err(if exists == 0 {
                ReviewRepositoryError::NotFound(review_id)
            } else {
                ReviewRepositoryError::EditConflict(review_id)
            })
        })
        .await
    }

    async fn find_by_id(&self, id: ReviewId) -> ReviewRepositoryResult<Option<Review>> {
        self.run_blocking(move |connection| {
            let row = reviews::table
                .filter(reviews::id.eq(id.value()))
                .select(ReviewRow::as_select())
                .first::<ReviewRow>(connection)
                .optional()
                .map_err(ReviewRepositoryError::persistence)?;
            row.map(row_to_review).transpose()
        })
        .await
    }

    async fn find_by_job(&self, job_id: JobId) -> ReviewRepositoryResult<Vec<Review>> {
        self.run_blocking(move |connection| {
            reviews::table
                .filter(reviews::job_id.eq(job_id.value()))
                .order(reviews::id.asc())
                .select(ReviewRow::as_select())
                .load::<ReviewRow>(connection)
                .map_err(ReviewRepositoryError::persistence)?
                .into_iter()
                .map(row_to_review)
                .collect()
        })
        .await
    }
}

fn is_triple_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == "reviews_triple_unique")
}

fn to_row(review: &Review) -> ReviewRow {
    ReviewRow {
        id: review.id().value(),
        job_id: review.job_id().value(),
        rater_id: review.rater_id().value(),
        ratee_id: review.ratee_id().value(),
        rater_role: review.rater_role().as_str().to_owned(),
        rating: i16::from(review.rating().value()),
        comment: review.comment().map(str::to_owned),
        edited: review.is_edited(),
        created_at: review.created_at(),
        updated_at: review.updated_at(),
    }
}

fn row_to_review(row: ReviewRow) -> ReviewRepositoryResult<Review> {
    let stars = u8::try_from(row.rating).map_err(ReviewRepositoryError::persistence)?;
    let data = PersistedReviewData {
        id: ReviewId::new(row.id),
        job_id: JobId::new(row.job_id),
        rater_id: UserId::new(row.rater_id),
        ratee_id: UserId::new(row.ratee_id),
        rater_role: RaterRole::try_from(row.rater_role.as_str())
            .map_err(ReviewRepositoryError::persistence)?,
        rating: Rating::new(stars).map_err(ReviewRepositoryError::persistence)?,
        comment: row.comment,
        edited: row.edited,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Review::from_persisted(data))
}
