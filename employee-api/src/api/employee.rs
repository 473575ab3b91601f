//! Employee API Handlers

use axum::Json;
use axum::extract::State;
use http::StatusCode;
use shared::error::AppError;
use shared::models::{
    EmployeeCreate, EmployeeListResponse, EmployeeResponse, EmployeeUpdate, ListParams,
};

use super::extract::{PathParam, ValidJson, ValidQuery};
use crate::db::EmployeeRepository;
use crate::error::ServiceResult;
use crate::state::AppState;

type ApiResult<T> = ServiceResult<Json<T>>;

/// List employees, optionally filtered by `search`
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ListParams>,
) -> ApiResult<EmployeeListResponse> {
    let mut conn = state.acquire().await?;
    let mut repo = EmployeeRepository::new(&mut conn);

    let employees = match params.search_term() {
        Some(term) => repo.search(term, params.skip, params.limit).await?,
        None => repo.list(params.skip, params.limit).await?,
    };
    let total = repo.count().await?;

    Ok(Json(EmployeeListResponse::new(total, employees, &params)))
}

/// Get employee by id
pub async fn get_by_id(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ApiResult<EmployeeResponse> {
    let mut conn = state.acquire().await?;
    let employee = EmployeeRepository::new(&mut conn)
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::employee_not_found(id))?;
    Ok(Json(employee.into()))
}

/// Create a new employee
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<EmployeeCreate>,
) -> ServiceResult<(StatusCode, Json<EmployeeResponse>)> {
    let hire_date = payload.parsed_hire_date()?;
    let mut conn = state.acquire().await?;
    let mut repo = EmployeeRepository::new(&mut conn);

    if repo.get_by_email(&payload.email).await?.is_some() {
        return Err(AppError::email_exists(&payload.email).into());
    }

    let employee = repo.create(&payload, hire_date).await?;
    tracing::info!(id = employee.id, "Employee created");

    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// Replace an employee's fields (PUT)
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    ValidJson(payload): ValidJson<EmployeeUpdate>,
) -> ApiResult<EmployeeResponse> {
    apply_update(&state, id, &payload).await
}

/// Partially update an employee (PATCH)
pub async fn patch(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
    ValidJson(payload): ValidJson<EmployeeUpdate>,
) -> ApiResult<EmployeeResponse> {
    apply_update(&state, id, &payload).await
}

/// Shared by PUT and PATCH: only supplied fields are written
async fn apply_update(
    state: &AppState,
    id: i64,
    payload: &EmployeeUpdate,
) -> ApiResult<EmployeeResponse> {
    let hire_date = payload.parsed_hire_date()?;
    let mut conn = state.acquire().await?;
    let mut repo = EmployeeRepository::new(&mut conn);

    let current = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::employee_not_found(id))?;

    if let Some(email) = payload.email_change(&current.email)
        && repo.get_by_email(email).await?.is_some()
    {
        return Err(AppError::email_exists(email).into());
    }

    // Row may have been deleted since the lookup
    let employee = repo
        .update(id, payload, hire_date)
        .await?
        .ok_or_else(|| AppError::employee_not_found(id))?;
    tracing::info!(id, "Employee updated");

    Ok(Json(employee.into()))
}

/// Delete an employee
pub async fn delete(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> ServiceResult<StatusCode> {
    let mut conn = state.acquire().await?;
    if !EmployeeRepository::new(&mut conn).delete(id).await? {
        return Err(AppError::employee_not_found(id).into());
    }
    tracing::info!(id, "Employee deleted");
    Ok(StatusCode::NO_CONTENT)
}
