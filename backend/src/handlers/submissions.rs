use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;

use crate::{
    error::AppError,
    extract::{AppJson, AppPath},
    models::submission::{CreateSubmission, Submission},
    state::AppState,
    types::ContestId,
};

pub async fn list_submissions(
    State(state): State<AppState>,
    AppPath(contest_id): AppPath<ContestId>,
) -> Result<Json<Vec<Submission>>, AppError> {
    state.contests.find_by_id(contest_id).await?;

    let submissions = state
        .submissions
        .find_all()
        .await?
        .into_iter()
        .filter(|submission| submission.contest_id == contest_id)
        .collect();
    Ok(Json(submissions))
}

pub async fn create_submission(
    State(state): State<AppState>,
    AppPath(contest_id): AppPath<ContestId>,
    AppJson(payload): AppJson<CreateSubmission>,
) -> Result<(StatusCode, Json<Submission>), AppError> {
    let contest = state.contests.find_by_id(contest_id).await?;
    if !contest.accepts_submissions(Utc::now()) {
        return Err(AppError::Conflict(
            "Contest is not accepting submissions".to_string(),
        ));
    }
    state.users.find_by_id(payload.user_id).await?;

    let submission = state
        .submissions
        .create(Submission::new(contest_id, payload))
        .await?;

    tracing::info!(
        contest_id = %contest_id,
        user_id = %submission.user_id,
        submission_id = %submission.id,
        "Submission received"
    );
    Ok((StatusCode::CREATED, Json(submission)))
}
