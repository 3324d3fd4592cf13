//! Contest entry payments. Capturing funds is the payment provider's job;
//! this service only records the intent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::{
    repositories::Record,
    types::{ContestId, PaymentId, UserId},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Paypal,
}

impl PaymentMethod {
    pub const VALUES: [&'static str; 2] = ["card", "paypal"];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Recorded, waiting for the provider to confirm.
    Pending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub contest_id: ContestId,
    pub user_id: UserId,
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(payload: CreatePayment) -> Self {
        Self {
            id: PaymentId::new(),
            contest_id: payload.contest_id,
            user_id: payload.user_id,
            amount: payload.amount,
            method: payload.method,
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

impl Record for Payment {
    type Id = PaymentId;
    const KIND: &'static str = "Payment";

    fn id(&self) -> PaymentId {
        self.id
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayment {
    pub contest_id: ContestId,
    pub user_id: UserId,
    #[serde(deserialize_with = "lenient::f64")]
    pub amount: f64,
    pub method: PaymentMethod,
}
