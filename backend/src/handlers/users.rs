use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use crate::{
    error::AppError,
    extract::{AppJson, AppPath, AppQuery},
    models::user::{CreateUser, UpdateUser, UpdateUserRole, User, UserListQuery},
    state::AppState,
    types::UserId,
};

pub async fn list_users(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<UserListQuery>,
) -> Result<Json<Vec<User>>, AppError> {
    let users = state
        .users
        .find_all()
        .await?
        .into_iter()
        .filter(|user| query.matches(user))
        .collect();
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = User::new(payload);
    let email = user.email.clone();
    let user = state
        .users
        .create_unless(user, &|existing: &User| existing.has_email(&email))
        .await?
        .ok_or_else(email_taken)?;

    tracing::info!(user_id = %user.id, role = user.role.as_str(), "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<UserId>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.users.find_by_id(user_id).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<UserId>,
    AppJson(payload): AppJson<UpdateUser>,
) -> Result<Json<User>, AppError> {
    let mut user = state.users.find_by_id(user_id).await?;
    user.apply(payload);
    let email = user.email.clone();
    let user = state
        .users
        .update_unless(user, &|other: &User| other.has_email(&email))
        .await?
        .ok_or_else(email_taken)?;
    Ok(Json(user))
}

pub async fn update_user_role(
    State(state): State<AppState>,
    AppPath(user_id): AppPath<UserId>,
    AppJson(payload): AppJson<UpdateUserRole>,
) -> Result<Json<User>, AppError> {
    let mut user = state.users.find_by_id(user_id).await?;
    let previous = user.role;
    user.set_role(payload.role);
    let user = state.users.update(user).await?;

    tracing::info!(
        user_id = %user.id,
        from = previous.as_str(),
        to = user.role.as_str(),
        "User role changed"
    );
    Ok(Json(user))
}

fn email_taken() -> AppError {
    AppError::Conflict("Email is already registered".to_string())
}
