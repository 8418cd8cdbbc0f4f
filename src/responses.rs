//! GraphQL response shapes for the pull request listing.

use serde::Deserialize;

use crate::types::PullRequestSummary;

/// Pagination info for cursor-based pagination.
#[derive(Deserialize, Debug)]
pub struct PageInfo {
    #[serde(rename = "hasNextPage")]
    pub has_next_page: bool,
    #[serde(rename = "endCursor")]
    pub end_cursor: Option<String>,
}

/// Generic connection with page info and nodes.
#[derive(Deserialize, Debug)]
pub struct Connection<T> {
    #[serde(rename = "pageInfo")]
    pub page_info: PageInfo,
    pub nodes: Vec<T>,
}

#[derive(Deserialize, Debug)]
pub struct PullRequestsResponse {
    /// `null` for an unknown repository; the key itself is required.
    #[serde(deserialize_with = "Option::deserialize")]
    pub repository: Option<RepositoryNode>,
}

#[derive(Deserialize, Debug)]
pub struct RepositoryNode {
    #[serde(rename = "pullRequests")]
    pub pull_requests: Connection<PullRequestSummary>,
}
