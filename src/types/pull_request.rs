use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PullRequestSummary {
    pub number: u64,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}
