//! Cursor-paginated scan for open pull requests that have gone quiet.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::client::QueryExecutor;
use crate::clock::Clock;
use crate::error::{Result, StaleError};
use crate::responses::PullRequestsResponse;
use crate::types::{Repository, StaleResult};

pub const DEFAULT_THRESHOLD_DAYS: u32 = 7;
pub const MAX_PAGE_SIZE: u32 = 100;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

const OPEN_PULL_REQUESTS_QUERY: &str = r#"
query OpenPullRequests($repo_owner: String!, $repo_name: String!, $page_size: Int!, $cursor: String) {
    repository(owner: $repo_owner, name: $repo_name) {
        pullRequests(first: $page_size, after: $cursor, states: [OPEN]) {
            pageInfo {
                hasNextPage
                endCursor
            }
            nodes {
                number
                updatedAt
            }
        }
    }
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectOptions {
    /// Inclusive: a pull request dormant for exactly this many days is stale.
    pub threshold_days: u32,
    pub page_size: u32,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            threshold_days: DEFAULT_THRESHOLD_DAYS,
            page_size: MAX_PAGE_SIZE,
        }
    }
}

impl DetectOptions {
    fn validate(&self) -> Result<()> {
        if self.threshold_days == 0 {
            return Err(StaleError::InvalidThreshold(self.threshold_days));
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.page_size) {
            return Err(StaleError::InvalidPageSize(self.page_size));
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct QueryVariables<'a> {
    repo_owner: &'a str,
    repo_name: &'a str,
    page_size: u32,
    cursor: Option<&'a str>,
}

pub struct StaleDetector<'a, E: ?Sized, C: ?Sized> {
    executor: &'a E,
    clock: &'a C,
}

impl<'a, E, C> StaleDetector<'a, E, C>
where
    E: QueryExecutor + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(executor: &'a E, clock: &'a C) -> Self {
        Self { executor, clock }
    }

    /// Walk every page of open pull requests and collect the stale ones in
    /// the order the API returned them. Any failure aborts the whole run.
    #[instrument(skip(self, repo), fields(repo = %repo))]
    pub async fn detect(
        &self,
        repo: &Repository,
        options: DetectOptions,
    ) -> Result<Vec<StaleResult>> {
        options.validate()?;
        let threshold = i64::from(options.threshold_days);

        let mut stale = Vec::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let variables = serde_json::to_value(QueryVariables {
                repo_owner: &repo.owner,
                repo_name: &repo.name,
                page_size: options.page_size,
                cursor: cursor.as_deref(),
            })?;

            let data = self
                .executor
                .send(OPEN_PULL_REQUESTS_QUERY, variables)
                .await?;
            pages += 1;

            let response: PullRequestsResponse = serde_json::from_value(data)?;
            let connection = response
                .repository
                .ok_or_else(|| StaleError::RepositoryNotFound(repo.to_string()))?
                .pull_requests;

            debug!(
                page = pages,
                nodes = connection.nodes.len(),
                has_next_page = connection.page_info.has_next_page,
                "fetched page"
            );

            for pr in &connection.nodes {
                let days = self.elapsed_days(&pr.updated_at)?;
                if days >= threshold {
                    stale.push(StaleResult {
                        number: pr.number,
                        days_dormant: days.unsigned_abs(),
                    });
                }
            }

            if !connection.page_info.has_next_page {
                break;
            }

            cursor = Some(connection.page_info.end_cursor.ok_or_else(|| {
                StaleError::MalformedResponse(
                    "hasNextPage is true but endCursor is missing".to_string(),
                )
            })?);
        }

        info!(pages, stale = stale.len(), "scan complete");
        Ok(stale)
    }

    /// Whole days between now and `timestamp`, truncated toward zero.
    pub fn elapsed_days(&self, timestamp: &str) -> Result<i64> {
        days_between(self.clock.now(), timestamp)
    }
}

fn days_between(now: DateTime<Utc>, timestamp: &str) -> Result<i64> {
    let then = parse_timestamp(timestamp)?;
    Ok(now.signed_duration_since(then).num_days())
}

fn parse_timestamp(timestamp: &str) -> Result<DateTime<Utc>> {
    // chrono accepts single-digit fields, the fixed width does not
    if timestamp.len() != 20 {
        return Err(StaleError::InvalidTimestamp(timestamp.to_string()));
    }

    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|_| StaleError::InvalidTimestamp(timestamp.to_string()))
}
