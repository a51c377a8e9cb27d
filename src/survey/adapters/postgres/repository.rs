//! `PostgreSQL` repository implementation for survey result storage.

use super::{
    connection::with_connection,
    models::{NewSurveyResultRow, SurveyAnswerChangeset, SurveyResultRow},
    schema::survey_results,
};
use crate::survey::{
    domain::{
        IssueId, IssueNumber, PullRequestNumber, SurveyRecord, SurveyUpsert, UpsertOutcome,
        UsagePercentage,
    },
    ports::{SurveyRepository, SurveyRepositoryError, SurveyRepositoryResult},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::dsl::sql;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_types::Bool;

/// `PostgreSQL` connection pool type used by survey adapters.
pub type SurveyPgPool = Pool<ConnectionManager<PgConnection>>;

/// Idempotent DDL creating the survey results table.
pub const SURVEY_SCHEMA_SQL: &str =
    include_str!("../../../../migrations/2026-10-01-000000_create_survey_results/up.sql");

/// `PostgreSQL`-backed survey repository.
#[derive(Debug, Clone)]
pub struct PostgresSurveyRepository {
    pool: SurveyPgPool,
}

impl PostgresSurveyRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: SurveyPgPool) -> Self {
        Self { pool }
    }

    /// Builds a pool of at most `max_size` connections to `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyRepositoryError::Persistence`] when `max_size` is zero
    /// or the pool cannot open its initial connections.
    pub async fn connect(database_url: &str, max_size: u32) -> SurveyRepositoryResult<Self> {
        if max_size == 0 {
            return Err(SurveyRepositoryError::persistence(std::io::Error::other(
                "connection pool size must be positive",
            )));
        }
        let manager = ConnectionManager::<PgConnection>::new(database_url);
        let pool = tokio::task::spawn_blocking(move || {
            Pool::builder().max_size(max_size).build(manager)
        })
        .await
        .map_err(SurveyRepositoryError::persistence)?
        .map_err(SurveyRepositoryError::persistence)?;
        Ok(Self::new(pool))
    }

    /// Creates the survey results table when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`SurveyRepositoryError::Persistence`] when the DDL fails.
    pub async fn apply_schema(&self) -> SurveyRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(SURVEY_SCHEMA_SQL)
                .map_err(SurveyRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> SurveyRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> SurveyRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            with_connection(&pool, SurveyRepositoryError::persistence, f)
        })
        .await
        .map_err(SurveyRepositoryError::persistence)?
    }
}

#[async_trait]
impl SurveyRepository for PostgresSurveyRepository {
    async fn upsert(&self, upsert: &SurveyUpsert) -> SurveyRepositoryResult<UpsertOutcome> {
        let new_row = to_new_row(upsert)?;
        let changeset = to_changeset(&new_row);

        // `xmax` is zero only for a row version created by this insert.
        self.run_blocking(move |connection| {
            let inserted = diesel::insert_into(survey_results::table)
                .values(&new_row)
                .on_conflict(survey_results::issue_id)
                .do_update()
                .set(&changeset)
                .returning(sql::<Bool>("xmax = 0"))
                .get_result::<bool>(connection)
                .map_err(SurveyRepositoryError::persistence)?;
            Ok(if inserted {
                UpsertOutcome::Inserted
            } else {
                UpsertOutcome::Updated
            })
        })
        .await
    }

    async fn find_by_issue_id(
        &self,
        issue_id: IssueId,
    ) -> SurveyRepositoryResult<Option<SurveyRecord>> {
        let key = to_column(issue_id.value(), "issue_id")?;
        self.run_blocking(move |connection| {
            let row = survey_results::table
                .filter(survey_results::issue_id.eq(key))
                .select(SurveyResultRow::as_select())
                .first::<SurveyResultRow>(connection)
                .optional()
                .map_err(SurveyRepositoryError::persistence)?;
            row.map(row_to_record).transpose()
        })
        .await
    }
}

fn to_column(value: u64, column: &str) -> SurveyRepositoryResult<i64> {
    i64::try_from(value).map_err(|err| {
        SurveyRepositoryError::persistence(std::io::Error::other(format!(
            "{column} {value} exceeds the BIGINT range: {err}"
        )))
    })
}

fn to_new_row(upsert: &SurveyUpsert) -> SurveyRepositoryResult<NewSurveyResultRow> {
    let SurveyUpsert { context, answer } = upsert;
    Ok(NewSurveyResultRow {
        issue_id: to_column(context.issue_id.value(), "issue_id")?,
        enterprise_name: context.enterprise_name.clone(),
        owner_login: context.repository.owner().to_owned(),
        repo_name: context.repository.name().to_owned(),
        issue_number: to_column(context.issue_number.value(), "issue_number")?,
        pr_number: to_column(answer.pr_number.value(), "pr_number")?,
        assignee_login: context.assignee_login.clone(),
        assistant_used: answer.assistant_used,
        usage_percentage: answer
            .usage_percentage
            .as_ref()
            .map(UsagePercentage::to_storage),
        non_use_reason: answer.non_use_reason.clone(),
        created_at: context.created_at,
        updated_at: context.updated_at,
    })
}

fn to_changeset(row: &NewSurveyResultRow) -> SurveyAnswerChangeset {
    SurveyAnswerChangeset {
        pr_number: row.pr_number,
        assistant_used: row.assistant_used,
        usage_percentage: row.usage_percentage.clone(),
        non_use_reason: row.non_use_reason.clone(),
        updated_at: row.updated_at,
    }
}

fn row_to_record(row: SurveyResultRow) -> SurveyRepositoryResult<SurveyRecord> {
    let SurveyResultRow {
        issue_id: raw_issue_id,
        enterprise_name,
        owner_login,
        repo_name,
        issue_number: raw_issue_number,
        pr_number: raw_pr_number,
        assignee_login,
        assistant_used,
        usage_percentage,
        non_use_reason,
        created_at,
        updated_at,
    } = row;

    let corrupt = |reason: String| SurveyRepositoryError::CorruptRecord {
        issue_id: raw_issue_id,
        reason,
    };
    let unsigned = |value: i64, column: &str| {
        u64::try_from(value).map_err(|_| corrupt(format!("{column} {value} is negative")))
    };

    let issue_id = IssueId::new(unsigned(raw_issue_id, "issue_id")?)
        .map_err(|err| corrupt(err.to_string()))?;
    let issue_number = IssueNumber::new(unsigned(raw_issue_number, "issue_number")?)
        .map_err(|err| corrupt(err.to_string()))?;
    let pr_number = PullRequestNumber::new(unsigned(raw_pr_number, "pr_number")?)
        .map_err(|err| corrupt(err.to_string()))?;

    Ok(SurveyRecord {
        issue_id,
        enterprise_name,
        owner_login,
        repo_name,
        issue_number,
        pr_number,
        assignee_login,
        assistant_used,
        usage_percentage: usage_percentage
            .as_deref()
            .and_then(UsagePercentage::from_storage),
        non_use_reason,
        created_at,
        updated_at,
    })
}
