//! `PostgreSQL` repository implementation for job boards.

use super::{
    models::{ApplicationRow, CooldownRow, JobChangeset, JobRow, NewJobRow},
    schema::{applications, jobs, reapplication_cooldowns},
};
use crate::engagement::{
    domain::{
        Application, ApplicationId, ApplicationStatus, Budget, ClosingNote, Job, JobBoard,
        JobDetails, JobId, JobStatus, PersistedApplicationData, PersistedBoardData,
        PersistedJobData,
    },
    ports::{
        ApplicationQuery, EngagementRepository, EngagementRepositoryError,
        EngagementRepositoryResult,
    },
};
use crate::identity::domain::UserId;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;
use std::collections::BTreeMap;

/// `PostgreSQL` connection pool type used by engagement adapters.
pub type EngagementPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed job board repository.
///
/// A save updates the job row only when its stored version matches the
/// loaded one, then rewrites the board's applications and cooldown anchors
/// inside the same transaction.
#[derive(Debug, Clone)]
pub struct PostgresEngagementRepository {
    pool: EngagementPgPool,
}

#[derive(Debug, QueryableByName)]
struct SequenceValue {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    value: i64,
}

impl From<DieselError> for EngagementRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

impl PostgresEngagementRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: EngagementPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> EngagementRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> EngagementRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(EngagementRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(EngagementRepositoryError::persistence)?
    }
}

#[async_trait]
impl EngagementRepository for PostgresEngagementRepository {
    async fn next_job_id(&self) -> EngagementRepositoryResult<JobId> {
        self.run_blocking(|connection| {
            next_sequence_value(connection, "jobs_id_seq").map(JobId::new)
        })
        .await
    }

    async fn next_application_id(&self) -> EngagementRepositoryResult<ApplicationId> {
        self.run_blocking(|connection| {
            next_sequence_value(connection, "applications_id_seq").map(ApplicationId::new)
        })
        .await
    }

    async fn insert_board(&self, board: &JobBoard) -> EngagementRepositoryResult<()> {
        let job_id = board.job().id();
        let job_row = to_new_job_row(board.job(), board.version())?;
        let application_rows = to_application_rows(board.applications())?;
        let cooldown_rows = to_cooldown_rows(job_id, board);

        self.run_blocking(move |connection| {
            connection.transaction::<_, EngagementRepositoryError, _>(|tx| {
                diesel::insert_into(jobs::table)
                    .values(&job_row)
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            EngagementRepositoryError::DuplicateJob(job_id)
                        }
                        other => EngagementRepositoryError::persistence(other),
                    })?;
                write_children(tx, job_id, &application_rows, &cooldown_rows)
            })
        })
        .await
    }

    async fn save_board(&self, board: &JobBoard) -> EngagementRepositoryResult<()> {
        let job_id = board.job().id();
        let expected = board.version();
        let changeset = to_job_changeset(board.job(), expected.saturating_add(1))?;
        let application_rows = to_application_rows(board.applications())?;
        let cooldown_rows = to_cooldown_rows(job_id, board);

        self.run_blocking(move |connection| {
            connection.transaction::<_, EngagementRepositoryError, _>(|tx| {
                let updated = diesel::update(
                    jobs::table
                        .filter(jobs::id.eq(job_id.value()))
                        .filter(jobs::version.eq(to_db_version(expected)?)),
                )
                .set(&changeset)
                .execute(tx)?;
                if updated == 0 {
                    return Err(missing_or_conflicting(tx, job_id, expected)?);
                }
                write_children(tx, job_id, &application_rows, &cooldown_rows)
            })
        })
        .await
    }

    async fn delete_board(
        &self,
        job_id: JobId,
        expected_version: u64,
    ) -> EngagementRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, EngagementRepositoryError, _>(|tx| {
                let deleted = diesel::delete(
                    jobs::table
                        .filter(jobs::id.eq(job_id.value()))
                        .filter(jobs::version.eq(to_db_version(expected_version)?)),
                )
                .execute(tx)?;
                if deleted == 0 {
                    return Err(missing_or_conflicting(tx, job_id, expected_version)?);
                }
                Ok(())
            })
        })
        .await
    }

    async fn load_board(&self, job_id: JobId) -> EngagementRepositoryResult<Option<JobBoard>> {
        self.run_blocking(move |connection| {
            let Some(job_row) = jobs::table
                .filter(jobs::id.eq(job_id.value()))
                .select(JobRow::as_select())
                .first::<JobRow>(connection)
                .optional()?
            else {
                return Ok(None);
            };
            let application_rows = applications::table
                .filter(applications::job_id.eq(job_id.value()))
                .order(applications::id.asc())
                .select(ApplicationRow::as_select())
                .load::<ApplicationRow>(connection)?;
            let cooldown_rows = reapplication_cooldowns::table
                .filter(reapplication_cooldowns::job_id.eq(job_id.value()))
                .select(CooldownRow::as_select())
                .load::<CooldownRow>(connection)?;
            rows_to_board(job_row, application_rows, cooldown_rows).map(Some)
        })
        .await
    }

    async fn find_job_of_application(
        &self,
        application_id: ApplicationId,
    ) -> EngagementRepositoryResult<Option<JobId>> {
        self.run_blocking(move |connection| {
            let job_id = applications::table
                .filter(applications::id.eq(application_id.value()))
                .select(applications::job_id)
                .first::<i64>(connection)
                .optional()?;
            Ok(job_id.map(JobId::new))
        })
        .await
    }

    async fn list_jobs_by_customer(
        &self,
        customer_id: UserId,
    ) -> EngagementRepositoryResult<Vec<Job>> {
        self.run_blocking(move |connection| {
            jobs::table
                .filter(jobs::customer_id.eq(customer_id.value()))
                .order(jobs::id.asc())
                .select(JobRow::as_select())
                .load::<JobRow>(connection)?
                .into_iter()
                .map(|row| row_to_job(row).map(|(job, _)| job))
                .collect()
        })
        .await
    }

    async fn find_applications(
        &self,
        query: ApplicationQuery,
    ) -> EngagementRepositoryResult<Vec<Application>> {
        self.run_blocking(move |connection| {
            let mut statement = applications::table
                .select(ApplicationRow::as_select())
                .order(applications::id.asc())
                .into_boxed();
            if let Some(job_id) = query.job_id {
                statement = statement.filter(applications::job_id.eq(job_id.value()));
            }
            if let Some(tasker_id) = query.tasker_id {
                statement = statement.filter(applications::tasker_id.eq(tasker_id.value()));
            }
            statement
                .load::<ApplicationRow>(connection)?
                .into_iter()
                .map(row_to_application)
                .collect()
        })
        .await
    }
}

fn next_sequence_value(
    connection: &mut PgConnection,
    sequence: &'static str,
) -> EngagementRepositoryResult<i64> {
    let row = diesel::sql_query("SELECT nextval($1::regclass) AS value")
        .bind::<diesel::sql_types::Text, _>(sequence)
        .get_result::<SequenceValue>(connection)?;
    Ok(row.value)
}

fn missing_or_conflicting(
    connection: &mut PgConnection,
    job_id: JobId,
    expected: u64,
) -> EngagementRepositoryResult<EngagementRepositoryError> {
    let exists: i64 = jobs::table
        .filter(jobs::id.eq(job_id.value()))
        .count()
        .get_result(connection)?;
    Ok(if exists == 0 {
        EngagementRepositoryError::NotFound(job_id)
    } else {
        EngagementRepositoryError::VersionConflict { job_id, expected }
    })
}

fn write_children(
    connection: &mut PgConnection,
    job_id: JobId,
    application_rows: &[ApplicationRow],
    cooldown_rows: &[CooldownRow],
) -> EngagementRepositoryResult<()> {
    if !application_rows.is_empty() {
        diesel::insert_into(applications::table)
            .values(application_rows)
            .on_conflict(applications::id)
            .do_update()
            .set((
                applications::status.eq(excluded(applications::status)),
                applications::closing_note.eq(excluded(applications::closing_note)),
                applications::accepted_at.eq(excluded(applications::accepted_at)),
                applications::closed_at.eq(excluded(applications::closed_at)),
                applications::updated_at.eq(excluded(applications::updated_at)),
            ))
            .execute(connection)?;
    }

    diesel::delete(
        reapplication_cooldowns::table.filter(reapplication_cooldowns::job_id.eq(job_id.value())),
    )
    .execute(connection)?;
    if !cooldown_rows.is_empty() {
        diesel::insert_into(reapplication_cooldowns::table)
            .values(cooldown_rows)
            .execute(connection)?;
    }
    Ok(())
}

fn to_db_version(version: u64) -> EngagementRepositoryResult<i64> {
    i64::try_from(version).map_err(EngagementRepositoryError::persistence)
}

fn to_db_budget(budget: Option<Budget>) -> EngagementRepositoryResult<Option<i64>> {
    budget
        .map(|value| {
            i64::try_from(value.minor_units()).map_err(EngagementRepositoryError::persistence)
        })
        .transpose()
}

fn from_db_budget(minor_units: Option<i64>) -> EngagementRepositoryResult<Option<Budget>> {
    minor_units
        .map(|value| {
            u64::try_from(value)
                .map(Budget::from_minor_units)
                .map_err(EngagementRepositoryError::persistence)
        })
        .transpose()
}

fn to_new_job_row(job: &Job, version: u64) -> EngagementRepositoryResult<NewJobRow> {
    let details = job.details();
    Ok(NewJobRow {
        id: job.id().value(),
        customer_id: job.customer_id().value(),
        title: details.title().to_owned(),
        description: details.description().map(str::to_owned),
        budget_minor_units: to_db_budget(details.budget())?,
        required_skills: serde_json::to_value(details.required_skills())
            .map_err(EngagementRepositoryError::persistence)?,
        status: job.status().as_str().to_owned(),
        applications_count: i32::try_from(job.applications_count())
            .map_err(EngagementRepositoryError::persistence)?,
        version: to_db_version(version)?,
        created_at: job.created_at(),
        updated_at: job.updated_at(),
    })
}

fn to_job_changeset(job: &Job, next_version: u64) -> EngagementRepositoryResult<JobChangeset> {
    let row = to_new_job_row(job, next_version)?;
    Ok(JobChangeset {
        title: row.title,
        description: row.description,
        budget_minor_units: row.budget_minor_units,
        required_skills: row.required_skills,
        status: row.status,
        applications_count: row.applications_count,
        version: row.version,
        updated_at: row.updated_at,
    })
}

fn to_application_rows(
    applications: &[Application],
) -> EngagementRepositoryResult<Vec<ApplicationRow>> {
    applications
        .iter()
        .map(|application| {
            let closing_note = application
                .closing_note()
                .map(serde_json::to_value)
                .transpose()
                .map_err(EngagementRepositoryError::persistence)?;
            Ok(ApplicationRow {
                id: application.id().value(),
                job_id: application.job_id().value(),
                tasker_id: application.tasker_id().value(),
                status: application.status().as_str().to_owned(),
                cover_letter: application.cover_letter().map(str::to_owned),
                closing_note,
                proposed_budget_minor_units: to_db_budget(application.proposed_budget())?,
                accepted_at: application.accepted_at(),
                closed_at: application.closed_at(),
                created_at: application.created_at(),
                updated_at: application.updated_at(),
            })
        })
        .collect()
}

fn to_cooldown_rows(job_id: JobId, board: &JobBoard) -> Vec<CooldownRow> {
    board
        .cooldowns()
        .iter()
        .map(|(tasker_id, anchored_at)| CooldownRow {
            job_id: job_id.value(),
            tasker_id: tasker_id.value(),
            anchored_at: *anchored_at,
        })
        .collect()
}

fn row_to_job(row: JobRow) -> EngagementRepositoryResult<(Job, u64)> {
    let JobRow {
        id,
        customer_id,
        title,
        description,
        budget_minor_units,
        required_skills,
        status,
        applications_count,
        version,
        created_at,
        updated_at,
    } = row;

    let skills = serde_json::from_value::<Vec<String>>(required_skills)
        .map_err(EngagementRepositoryError::persistence)?;
    let mut details = JobDetails::new(title)
        .map_err(EngagementRepositoryError::persistence)?
        .with_required_skills(skills);
    if let Some(text) = description {
        details = details.with_description(text);
    }
    if let Some(budget) = from_db_budget(budget_minor_units)? {
        details = details.with_budget(budget);
    }

    let data = PersistedJobData {
        id: JobId::new(id),
        customer_id: UserId::new(customer_id),
        details,
        status: JobStatus::try_from(status.as_str())
            .map_err(EngagementRepositoryError::persistence)?,
        applications_count: u32::try_from(applications_count)
            .map_err(EngagementRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    let version = u64::try_from(version).map_err(EngagementRepositoryError::persistence)?;
    Ok((Job::from_persisted(data), version))
}

fn row_to_application(row: ApplicationRow) -> EngagementRepositoryResult<Application> {
    let closing_note = row
        .closing_note
        .map(serde_json::from_value::<ClosingNote>)
        .transpose()
        .map_err(EngagementRepositoryError::persistence)?;
    let data = PersistedApplicationData {
        id: ApplicationId::new(row.id),
        job_id: JobId::new(row.job_id),
        tasker_id: UserId::new(row.tasker_id),
        status: ApplicationStatus::try_from(row.status.as_str())
            .map_err(EngagementRepositoryError::persistence)?,
        cover_letter: row.cover_letter,
        closing_note,
        proposed_budget: from_db_budget(row.proposed_budget_minor_units)?,
        accepted_at: row.accepted_at,
        closed_at: row.closed_at,
        created_at: row.created_at,
        updated_at: row.updated_at,
    };
    Ok(Application::from_persisted(data))
}

fn rows_to_board(
    job_row: JobRow,
    application_rows: Vec<ApplicationRow>,
    cooldown_rows: Vec<CooldownRow>,
) -> EngagementRepositoryResult<JobBoard> {
    let (job, version) = row_to_job(job_row)?;
    let applications = application_rows
        .into_iter()
        .map(row_to_application)
        .collect::<EngagementRepositoryResult<Vec<_>>>()?;
    let cooldowns: BTreeMap<UserId, _> = cooldown_rows
        .into_iter()
        .map(|row| (UserId::new(row.tasker_id), row.anchored_at))
        .collect();
    Ok(JobBoard::from_persisted(PersistedBoardData {
        job,
        applications,
        cooldowns,
        version,
    }))
}
