// src/handlers/crm.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::crm::{CustomerPatch, UserPatch},
};

// =========================================================================
//  USUÁRIOS
// =========================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserPayload,
    responses((status = 201, description = "Usuário criado", body = crate::models::crm::User)),
    tag = "crm"
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state
        .crm_service
        .create_user(&app_state.db_pool, &payload.name)
        .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users",
    responses((status = 200, description = "Lista de usuários", body = [crate::models::crm::User])),
    tag = "crm"
)]
pub async fn list_users(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.crm_service.list_users().await?;
    Ok((StatusCode::OK, Json(users)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "Id do usuário")),
    responses(
        (status = 200, description = "Usuário", body = crate::models::crm::User),
        (status = 404, description = "Usuário não encontrado"),
    ),
    tag = "crm"
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.crm_service.get_user(&app_state.db_pool, id).await?;
    Ok((StatusCode::OK, Json(user)))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "Id do usuário")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Usuário atualizado", body = crate::models::crm::User),
        (status = 404, description = "Usuário não encontrado"),
    ),
    tag = "crm"
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<UserPatch>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .crm_service
        .update_user(&app_state.db_pool, id, &patch)
        .await?;
    Ok((StatusCode::OK, Json(user)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = Uuid, Path, description = "Id do usuário")),
    responses(
        (status = 200, description = "Usuário removido", body = crate::models::crm::User),
        (status = 409, description = "Usuário referenciado pelo histórico"),
    ),
    tag = "crm"
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state
        .crm_service
        .delete_user(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(user)))
}

// =========================================================================
//  CLIENTES
// =========================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[validate(length(min = 1, message = "O endereço é obrigatório."))]
    pub address: String,

    #[validate(length(min = 1, message = "O telefone é obrigatório."))]
    pub phone: String,
}

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerPayload,
    responses((status = 201, description = "Cliente criado", body = crate::models::crm::Customer)),
    tag = "crm"
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .crm_service
        .create_customer(
            &app_state.db_pool,
            &payload.name,
            &payload.address,
            &payload.phone,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/api/customers",
    responses((status = 200, description = "Lista de clientes", body = [crate::models::crm::Customer])),
    tag = "crm"
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.crm_service.list_customers().await?;
    Ok((StatusCode::OK, Json(customers)))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    params(("id" = Uuid, Path, description = "Id do cliente")),
    responses(
        (status = 200, description = "Cliente", body = crate::models::crm::Customer),
        (status = 404, description = "Cliente não encontrado"),
    ),
    tag = "crm"
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .crm_service
        .get_customer(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(customer)))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    params(("id" = Uuid, Path, description = "Id do cliente")),
    request_body = CustomerPatch,
    responses(
        (status = 200, description = "Cliente atualizado", body = crate::models::crm::Customer),
        (status = 404, description = "Cliente não encontrado"),
    ),
    tag = "crm"
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<CustomerPatch>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .crm_service
        .update_customer(&app_state.db_pool, id, &patch)
        .await?;
    Ok((StatusCode::OK, Json(customer)))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    params(("id" = Uuid, Path, description = "Id do cliente")),
    responses(
        (status = 200, description = "Cliente removido", body = crate::models::crm::Customer),
        (status = 409, description = "Cliente referenciado pelo histórico"),
    ),
    tag = "crm"
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .crm_service
        .delete_customer(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(customer)))
}
