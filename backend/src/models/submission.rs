use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    repositories::Record,
    types::{ContestId, SubmissionId, UserId},
};

/// A participant's entry into a contest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: SubmissionId,
    pub contest_id: ContestId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(contest_id: ContestId, payload: CreateSubmission) -> Self {
        Self {
            id: SubmissionId::new(),
            contest_id,
            user_id: payload.user_id,
            title: payload.title,
            content: payload.content,
            created_at: Utc::now(),
        }
    }
}

impl Record for Submission {
    type Id = SubmissionId;
    const KIND: &'static str = "Submission";

    fn id(&self) -> SubmissionId {
        self.id
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmission {
    pub user_id: UserId,
    pub title: String,
    /// Image URL or article text, depending on the contest type.
    pub content: String,
}
