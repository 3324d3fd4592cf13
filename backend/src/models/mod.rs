//! Data models shared across repositories and API handlers.

use serde::{Deserialize, Serialize};

pub mod contest;
pub mod payment;
pub mod submission;
pub mod user;

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

/// Page/limit query parameters. Values arrive as loosely typed query strings,
/// so fractional or out-of-range numbers are floored and clamped here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<f64>,
    pub limit: Option<f64>,
}

impl PageQuery {
    /// One-based page number, at least 1.
    pub fn page(&self) -> usize {
        self.page
            .filter(|p| p.is_finite() && *p >= 1.0)
            .map(|p| p.floor() as usize)
            .unwrap_or(1)
    }

    /// Page size within 1..=100, default 20.
    pub fn limit(&self) -> usize {
        self.limit
            .filter(|l| l.is_finite())
            .map(|l| (l.floor().max(1.0) as usize).min(MAX_PAGE_SIZE))
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

/// Wrapper for paginated API responses.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub page: usize,
    pub limit: usize,
    /// Number of records matching the filters before paging.
    pub total: usize,
}

impl<T: Serialize> Page<T> {
    pub fn from_matches(matches: Vec<T>, query: &PageQuery) -> Self {
        let total = matches.len();
        let items = matches
            .into_iter()
            .skip(query.offset())
            .take(query.limit())
            .collect();
        Self {
            items,
            page: query.page(),
            limit: query.limit(),
            total,
        }
    }
}

/// Serde helpers for numeric fields that may arrive as numbers or numeric
/// strings.
pub(crate) mod lenient {
    use serde::{de, Deserialize, Deserializer};
    use serde_json::Value;

    use crate::validation::coerce_number;

    pub fn f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        coerce_number(&value).ok_or_else(|| de::Error::custom("expected a number"))
    }

    pub fn option_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(value) => coerce_number(&value)
                .map(Some)
                .ok_or_else(|| de::Error::custom("expected a number")),
        }
    }
}
