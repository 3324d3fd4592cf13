//! Named request schemas used by the API routes.
//!
//! Schemas are built once on first use and never change afterwards, so every
//! route shares them by `&'static` reference.

use std::fmt;

use once_cell::sync::Lazy;
use thiserror::Error;

use super::rules::{FieldRule, RuleSet, SchemaError};
use crate::models::{
    contest::{ContestStatus, ContestType},
    payment::PaymentMethod,
    user::UserRole,
};

/// The part of a request a rule set applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Body,
    Params,
    Query,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Body => "body",
            DataSource::Params => "params",
            DataSource::Query => "query",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule sets for the body, path params and query of one endpoint.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub name: &'static str,
    pub body: Option<RuleSet>,
    pub params: Option<RuleSet>,
    pub query: Option<RuleSet>,
}

impl Schema {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    pub fn body(mut self, rules: RuleSet) -> Self {
        self.body = Some(rules);
        self
    }

    pub fn params(mut self, rules: RuleSet) -> Self {
        self.params = Some(rules);
        self
    }

    pub fn query(mut self, rules: RuleSet) -> Self {
        self.query = Some(rules);
        self
    }

    /// Declared rule sets in checking order: body, params, query.
    pub fn sources(&self) -> impl Iterator<Item = (DataSource, &RuleSet)> {
        [
            (DataSource::Body, self.body.as_ref()),
            (DataSource::Params, self.params.as_ref()),
            (DataSource::Query, self.query.as_ref()),
        ]
        .into_iter()
        .filter_map(|(source, rules)| rules.map(|rules| (source, rules)))
    }

    pub fn check(&self) -> Result<(), MalformedSchema> {
        self.sources().try_for_each(|(location, rules)| {
            rules.check().map_err(|error| MalformedSchema {
                schema: self.name,
                location,
                error,
            })
        })
    }
}

#[derive(Debug, Error)]
#[error("schema `{schema}` has a malformed {location} rule: {error}")]
pub struct MalformedSchema {
    pub schema: &'static str,
    pub location: DataSource,
    #[source]
    pub error: SchemaError,
}

fn id_params() -> RuleSet {
    RuleSet::new().field("id", FieldRule::required())
}

pub static CREATE_CONTEST: Lazy<Schema> = Lazy::new(|| {
    Schema::new("createContest").body(
        RuleSet::new()
            .field("name", FieldRule::required().length(3, 100))
            .field("description", FieldRule::required().length(10, 2000))
            .field("type", FieldRule::required().one_of(ContestType::VALUES))
            .field("price", FieldRule::required().number().min(0.0))
            .field("prizePool", FieldRule::optional().number().min(0.0))
            .field("deadline", FieldRule::required()),
    )
});

pub static UPDATE_CONTEST: Lazy<Schema> = Lazy::new(|| {
    Schema::new("updateContest")
        .body(
            RuleSet::new()
                .field("name", FieldRule::optional().length(3, 100))
                .field("description", FieldRule::optional().length(10, 2000))
                .field("type", FieldRule::optional().one_of(ContestType::VALUES))
                .field("price", FieldRule::optional().number().min(0.0))
                .field("prizePool", FieldRule::optional().number().min(0.0))
                .field("status", FieldRule::optional().one_of(ContestStatus::VALUES)),
        )
        .params(id_params())
});

pub static LIST_CONTESTS: Lazy<Schema> = Lazy::new(|| {
    Schema::new("listContests").query(
        RuleSet::new()
            .field("type", FieldRule::optional().one_of(ContestType::VALUES))
            .field("status", FieldRule::optional().one_of(ContestStatus::VALUES))
            .field("search", FieldRule::optional().max_length(100))
            .field("page", FieldRule::optional().number().min(1.0))
            .field("limit", FieldRule::optional().number().min(1.0).max(100.0)),
    )
});

pub static CONTEST_BY_ID: Lazy<Schema> =
    Lazy::new(|| Schema::new("contestById").params(id_params()));

pub static CREATE_USER: Lazy<Schema> = Lazy::new(|| {
    Schema::new("createUser").body(
        RuleSet::new()
            .field("name", FieldRule::required().length(2, 50))
            .field("email", FieldRule::required().email())
            .field("role", FieldRule::optional().one_of(UserRole::VALUES)),
    )
});

pub static LIST_USERS: Lazy<Schema> = Lazy::new(|| {
    Schema::new("listUsers")
        .query(RuleSet::new().field("role", FieldRule::optional().one_of(UserRole::VALUES)))
});

pub static UPDATE_USER: Lazy<Schema> = Lazy::new(|| {
    Schema::new("updateUser")
        .body(
            RuleSet::new()
                .field("name", FieldRule::optional().length(2, 50))
                .field("email", FieldRule::optional().email())
                .field("role", FieldRule::optional().one_of(UserRole::VALUES)),
        )
        .params(id_params())
});

pub static UPDATE_USER_ROLE: Lazy<Schema> = Lazy::new(|| {
    Schema::new("updateUserRole")
        .body(RuleSet::new().field("role", FieldRule::required().one_of(UserRole::VALUES)))
        .params(id_params())
});

pub static USER_BY_ID: Lazy<Schema> = Lazy::new(|| Schema::new("userById").params(id_params()));

pub static CREATE_SUBMISSION: Lazy<Schema> = Lazy::new(|| {
    Schema::new("createSubmission")
        .body(
            RuleSet::new()
                .field("userId", FieldRule::required())
                .field("title", FieldRule::required().length(3, 100))
                .field("content", FieldRule::required().length(10, 10_000)),
        )
        .params(id_params())
});

pub static CREATE_PAYMENT: Lazy<Schema> = Lazy::new(|| {
    Schema::new("createPayment").body(
        RuleSet::new()
            .field("contestId", FieldRule::required())
            .field("userId", FieldRule::required())
            .field(
                "amount",
                FieldRule::required().number().min(0.5).max(100_000.0),
            )
            .field("method", FieldRule::required().one_of(PaymentMethod::VALUES)),
    )
});

pub static PAYMENT_BY_ID: Lazy<Schema> =
    Lazy::new(|| Schema::new("paymentById").params(id_params()));

/// Every registered schema.
pub fn all() -> [&'static Schema; 12] {
    [
        &CREATE_CONTEST,
        &UPDATE_CONTEST,
        &LIST_CONTESTS,
        &CONTEST_BY_ID,
        &CREATE_USER,
        &LIST_USERS,
        &UPDATE_USER,
        &UPDATE_USER_ROLE,
        &USER_BY_ID,
        &CREATE_SUBMISSION,
        &CREATE_PAYMENT,
        &PAYMENT_BY_ID,
    ]
}

pub fn by_name(name: &str) -> Option<&'static Schema> {
    all().into_iter().find(|schema| schema.name == name)
}

/// Fails on the first schema holding an unsatisfiable rule.
pub fn verify_all() -> Result<(), MalformedSchema> {
    all().into_iter().try_for_each(Schema::check)
}
