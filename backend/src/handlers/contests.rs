use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    extract::{AppJson, AppPath, AppQuery},
    models::{
        contest::{Contest, ContestListQuery, CreateContest, UpdateContest},
        Page,
    },
    state::AppState,
    types::ContestId,
};

pub async fn list_contests(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ContestListQuery>,
) -> Result<Json<Page<Contest>>, AppError> {
    let mut matches: Vec<Contest> = state
        .contests
        .find_all()
        .await?
        .into_iter()
        .filter(|contest| query.matches(contest))
        .collect();
    matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(Json(Page::from_matches(matches, &query.paging())))
}

pub async fn create_contest(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateContest>,
) -> Result<(StatusCode, Json<Contest>), AppError> {
    let deadline = parse_deadline(&payload.deadline)?;
    let contest = state.contests.create(Contest::new(payload, deadline)).await?;

    tracing::info!(
        contest_id = %contest.id,
        contest_type = contest.contest_type.as_str(),
        "Contest created"
    );
    Ok((StatusCode::CREATED, Json(contest)))
}

pub async fn get_contest(
    State(state): State<AppState>,
    AppPath(contest_id): AppPath<ContestId>,
) -> Result<Json<Contest>, AppError> {
    Ok(Json(state.contests.find_by_id(contest_id).await?))
}

pub async fn update_contest(
    State(state): State<AppState>,
    AppPath(contest_id): AppPath<ContestId>,
    AppJson(payload): AppJson<UpdateContest>,
) -> Result<Json<Contest>, AppError> {
    let mut contest = state.contests.find_by_id(contest_id).await?;
    contest.apply(payload);
    let contest = state.contests.update(contest).await?;

    tracing::info!(
        contest_id = %contest.id,
        status = contest.status.as_str(),
        "Contest updated"
    );
    Ok(Json(contest))
}

/// Deletes the contest together with its submissions.
pub async fn delete_contest(
    State(state): State<AppState>,
    AppPath(contest_id): AppPath<ContestId>,
) -> Result<StatusCode, AppError> {
    state.contests.delete(contest_id).await?;

    let orphans = state
        .submissions
        .find_all()
        .await?
        .into_iter()
        .filter(|submission| submission.contest_id == contest_id);
    for submission in orphans {
        state.submissions.delete(submission.id).await?;
    }

    tracing::info!(contest_id = %contest_id, "Contest deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_deadline(raw: &str) -> Result<DateTime<Utc>, AppError> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|deadline| deadline.with_timezone(&Utc))
        .map_err(|_| {
            AppError::BadRequest("deadline must be an RFC 3339 timestamp".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_deadline_normalizes_to_utc() {
        let deadline = parse_deadline("2030-05-01T09:00:00+02:00").expect("deadline");
        assert_eq!(deadline.to_rfc3339(), "2030-05-01T07:00:00+00:00");
    }

    #[test]
    fn parse_deadline_rejects_plain_dates() {
        assert!(matches!(
            parse_deadline("2030-05-01"),
            Err(AppError::BadRequest(_))
        ));
    }
}
