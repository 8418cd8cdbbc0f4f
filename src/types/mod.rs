mod pull_request;
mod repository;
mod stale;

pub use pull_request::PullRequestSummary;
pub use repository::Repository;
pub use stale::StaleResult;
