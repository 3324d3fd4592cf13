//! Contests that creators publish and participants enter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{lenient, PageQuery};
use crate::{repositories::Record, types::ContestId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestType {
    Image,
    Article,
}

impl ContestType {
    pub const VALUES: [&'static str; 2] = ["image", "article"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContestType::Image => "image",
            ContestType::Article => "article",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    /// Accepting submissions until the deadline.
    #[default]
    Open,
    Closed,
}

impl ContestStatus {
    pub const VALUES: [&'static str; 2] = ["open", "closed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContestStatus::Open => "open",
            ContestStatus::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: ContestId,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub contest_type: ContestType,
    /// Entry fee.
    pub price: f64,
    pub prize_pool: Option<f64>,
    pub deadline: DateTime<Utc>,
    pub status: ContestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contest {
    pub fn new(payload: CreateContest, deadline: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: ContestId::new(),
            name: payload.name,
            description: payload.description,
            contest_type: payload.contest_type,
            price: payload.price,
            prize_pool: payload.prize_pool,
            deadline,
            status: ContestStatus::Open,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: UpdateContest) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(contest_type) = update.contest_type {
            self.contest_type = contest_type;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(prize_pool) = update.prize_pool {
            self.prize_pool = Some(prize_pool);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        self.updated_at = Utc::now();
    }

    pub fn accepts_submissions(&self, now: DateTime<Utc>) -> bool {
        self.status == ContestStatus::Open && now <= self.deadline
    }
}

impl Record for Contest {
    type Id = ContestId;
    const KIND: &'static str = "Contest";

    fn id(&self) -> ContestId {
        self.id
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContest {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub contest_type: ContestType,
    #[serde(deserialize_with = "lenient::f64")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub prize_pool: Option<f64>,
    /// RFC 3339 timestamp.
    pub deadline: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub contest_type: Option<ContestType>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub prize_pool: Option<f64>,
    pub status: Option<ContestStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContestListQuery {
    #[serde(rename = "type")]
    pub contest_type: Option<ContestType>,
    pub status: Option<ContestStatus>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub page: Option<f64>,
    #[serde(default, deserialize_with = "lenient::option_f64")]
    pub limit: Option<f64>,
}

impl ContestListQuery {
    pub fn matches(&self, contest: &Contest) -> bool {
        if self.contest_type.is_some_and(|t| t != contest.contest_type) {
            return false;
        }
        if self.status.is_some_and(|s| s != contest.status) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                contest.name.to_lowercase().contains(&term)
                    || contest.description.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }

    pub fn paging(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use serde_json::json;

    fn contest() -> Contest {
        let payload: CreateContest = serde_json::from_value(json!({
            "name": "Night Sky",
            "description": "Photographs of the stars above your town.",
            "type": "image",
            "price": "12.5",
            "deadline": "2030-01-01T00:00:00Z"
        }))
        .expect("payload");
        Contest::new(payload, Utc::now() + Duration::days(7))
    }

    #[test]
    fn create_payload_accepts_numeric_strings() {
        let contest = contest();
        assert_eq!(contest.price, 12.5);
        assert_eq!(contest.prize_pool, None);
        assert_eq!(contest.status, ContestStatus::Open);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let value = serde_json::to_value(contest()).expect("serialize");
        assert_eq!(value["type"], "image");
        assert_eq!(value["status"], "open");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("prizePool").is_some());
    }

    #[test]
    fn apply_updates_only_present_fields() {
        let mut contest = contest();
        let update: UpdateContest =
            serde_json::from_value(json!({"price": 3, "status": "closed"})).expect("update");
        contest.apply(update);
        assert_eq!(contest.price, 3.0);
        assert_eq!(contest.status, ContestStatus::Closed);
        assert_eq!(contest.name, "Night Sky");
    }

    #[test]
    fn closed_or_expired_contests_reject_submissions() {
        let mut contest = contest();
        let now = Utc::now();
        assert!(contest.accepts_submissions(now));
        assert!(!contest.accepts_submissions(contest.deadline + Duration::seconds(1)));
        contest.status = ContestStatus::Closed;
        assert!(!contest.accepts_submissions(now));
    }

    #[test]
    fn list_query_filters_by_type_status_and_search() {
        let contest = contest();
        let query = ContestListQuery {
            search: Some("STARS".into()),
            ..Default::default()
        };
        assert!(query.matches(&contest));

        let query = ContestListQuery {
            contest_type: Some(ContestType::Article),
            ..Default::default()
        };
        assert!(!query.matches(&contest));

        let query = ContestListQuery {
            status: Some(ContestStatus::Closed),
            ..Default::default()
        };
        assert!(!query.matches(&contest));
    }

    #[test]
    fn list_query_paging_tolerates_padded_numbers() {
        let uri: axum::http::Uri = "/api/contests?page=%202%20&limit=5".parse().expect("uri");
        let axum::extract::Query(query) =
            axum::extract::Query::<ContestListQuery>::try_from_uri(&uri).expect("query");
        assert_eq!(query.page, Some(2.0));
        assert_eq!(query.limit, Some(5.0));
        assert_eq!(query.paging().offset(), 5);
    }
}
