use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    extract::{AppJson, AppPath},
    models::payment::{CreatePayment, Payment},
    state::AppState,
    types::PaymentId,
};

/// Records a payment intent for a contest entry; the provider settles it.
pub async fn create_payment(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreatePayment>,
) -> Result<(StatusCode, Json<Payment>), AppError> {
    state.contests.find_by_id(payload.contest_id).await?;
    state.users.find_by_id(payload.user_id).await?;

    let payment = state.payments.create(Payment::new(payload)).await?;

    tracing::info!(
        payment_id = %payment.id,
        contest_id = %payment.contest_id,
        user_id = %payment.user_id,
        amount = payment.amount,
        "Payment recorded"
    );
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn get_payment(
    State(state): State<AppState>,
    AppPath(payment_id): AppPath<PaymentId>,
) -> Result<Json<Payment>, AppError> {
    Ok(Json(state.payments.find_by_id(payment_id).await?))
}
