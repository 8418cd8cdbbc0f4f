use serde::Serialize;

/// A pull request whose last update is at least the threshold in the past.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleResult {
    pub number: u64,
    pub days_dormant: u64,
}
