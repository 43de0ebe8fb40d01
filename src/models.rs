use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub votes: u64,
    #[serde(default)]
    pub voters: Vec<String>,
}

impl PollOption {
    pub fn has_voter(&self, user_id: &str) -> bool {
        self.voters.iter().any(|voter| voter == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    pub question: String,
    pub options: Arc<[Arc<PollOption>]>,
}

impl Poll {
    pub fn new(
        id: impl Into<String>,
        question: impl Into<String>,
        options: Vec<PollOption>,
    ) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            options: options.into_iter().map(Arc::new).collect(),
        }
    }
}

/// Immutable view of every poll; clones share storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Arc<[Arc<Poll>]>);

impl Snapshot {
    pub fn new(polls: Vec<Poll>) -> Self {
        Self(polls.into_iter().map(Arc::new).collect())
    }

    pub fn from_shared(polls: Arc<[Arc<Poll>]>) -> Self {
        Self(polls)
    }

    pub fn polls(&self) -> &[Arc<Poll>] {
        &self.0
    }

    pub fn get(&self, poll_id: &str) -> Option<&Arc<Poll>> {
        self.0.iter().find(|poll| poll.id == poll_id)
    }

    pub fn same_as(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Snapshot {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppData {
    #[serde(default)]
    pub polls: Snapshot,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub option_id: String,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub applied: bool,
    pub poll: PollResults,
}

#[derive(Debug, Serialize)]
pub struct OptionResult {
    pub id: String,
    pub text: String,
    pub votes: u64,
    pub share: f64,
    pub leading: bool,
}

#[derive(Debug, Serialize)]
pub struct PollResults {
    pub id: String,
    pub question: String,
    pub total_votes: u64,
    pub your_vote: Option<String>,
    pub options: Vec<OptionResult>,
}

#[derive(Debug, Serialize)]
pub struct PollSummary {
    pub id: String,
    pub question: String,
    pub total_votes: u64,
    pub leader: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub viewer: Option<String>,
    pub total_polls: usize,
    pub total_votes: u64,
    pub polls_voted: usize,
    pub polls: Vec<PollSummary>,
}
