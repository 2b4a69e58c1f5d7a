// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::ProductPatch,
};

// ---
// Payload: CreateProduct
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    #[schema(example = "12.50")]
    pub price: Decimal,

    pub description: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = crate::models::catalog::Product),
        (status = 400, description = "Payload inválido"),
    ),
    tag = "catalog"
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateProductPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.price.is_sign_negative() {
        return Err(AppError::NegativeValue("price"));
    }

    let product = app_state
        .catalog_service
        .create_product(
            &app_state.db_pool,
            &payload.name,
            payload.price,
            payload.description.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/products",
    responses((status = 200, description = "Lista de produtos", body = [crate::models::catalog::Product])),
    tag = "catalog"
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let products = app_state.catalog_service.list_products().await?;
    Ok((StatusCode::OK, Json(products)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Id do produto")),
    responses(
        (status = 200, description = "Produto", body = crate::models::catalog::Product),
        (status = 404, description = "Produto não encontrado"),
    ),
    tag = "catalog"
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .catalog_service
        .get_product(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Id do produto")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Produto atualizado", body = crate::models::catalog::Product),
        (status = 404, description = "Produto não encontrado"),
    ),
    tag = "catalog"
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<ProductPatch>,
) -> Result<impl IntoResponse, AppError> {
    if patch.price.is_some_and(|p| p.is_sign_negative()) {
        return Err(AppError::NegativeValue("price"));
    }

    let product = app_state
        .catalog_service
        .update_product(&app_state.db_pool, id, &patch)
        .await?;
    Ok((StatusCode::OK, Json(product)))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = Uuid, Path, description = "Id do produto")),
    responses(
        (status = 200, description = "Produto removido", body = crate::models::catalog::Product),
        (status = 404, description = "Produto não encontrado"),
        (status = 409, description = "Produto referenciado pelo histórico"),
    ),
    tag = "catalog"
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let product = app_state
        .catalog_service
        .delete_product(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(product)))
}
