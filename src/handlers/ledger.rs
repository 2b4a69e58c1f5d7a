// src/handlers/ledger.rs
//
// Os dois fluxos compostos (venda e entrada de estoque) entram por aqui,
// além da superfície de leitura de saldos e movimentações.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::ledger::{SaleLine, StockBalancePatch},
};

// ---
// Payload: CreateSale
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSalePayload {
    #[schema(value_type = String, format = Date, example = "2025-08-07")]
    pub date: NaiveDate,

    // A lista não pode ser vazia; quantidades <= 0 são rejeitadas
    // pelo coordenador antes de abrir a transação.
    #[validate(length(min = 1, message = "A venda precisa de pelo menos um item."))]
    pub items: Vec<SaleLine>,
}

#[utoipa::path(
    post,
    path = "/api/sales",
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada com invoice derivada", body = crate::services::sales_service::CreatedSale),
        (status = 404, description = "Produto inexistente"),
        (status = 409, description = "Estoque insuficiente"),
    ),
    tag = "ledger"
)]
pub async fn create_sale(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateSalePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = app_state
        .sales_service
        .create_sale(&app_state.db_pool, payload.date, &payload.items)
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    params(("id" = Uuid, Path, description = "Id da venda")),
    responses(
        (status = 200, description = "Venda com itens", body = crate::services::sales_service::SaleDetails),
        (status = 404, description = "Venda não encontrada"),
    ),
    tag = "ledger"
)]
pub async fn get_sale(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let details = app_state.sales_service.get_sale_details(id).await?;
    Ok((StatusCode::OK, Json(details)))
}

// ---
// Payload: CreateStockIn
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStockInPayload {
    #[schema(value_type = String, format = Date, example = "2025-08-07")]
    pub stock_in_date: NaiveDate,

    #[validate(range(min = 1, message = "A quantidade deve ser maior que zero."))]
    pub quantity: i64,

    pub product_id: Uuid,
    pub user_id: Uuid,
    pub customer_id: Uuid,
}

#[utoipa::path(
    post,
    path = "/api/stock/entries",
    request_body = CreateStockInPayload,
    responses(
        (status = 201, description = "Entrada registrada com invoice e payment derivados", body = crate::services::sales_service::CreatedStockIn),
        (status = 404, description = "Produto, usuário ou cliente inexistente"),
    ),
    tag = "ledger"
)]
pub async fn create_stock_in(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateStockInPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = app_state
        .sales_service
        .create_stock_in(
            &app_state.db_pool,
            payload.stock_in_date,
            payload.product_id,
            payload.quantity,
            payload.user_id,
            payload.customer_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/api/stock/entries",
    responses((status = 200, description = "Entradas de estoque", body = [crate::models::ledger::StockInEvent])),
    tag = "ledger"
)]
pub async fn list_stock_ins(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let events = app_state.sales_service.list_stock_ins().await?;
    Ok((StatusCode::OK, Json(events)))
}

#[utoipa::path(
    get,
    path = "/api/stock/entries/{id}",
    params(("id" = Uuid, Path, description = "Id da entrada")),
    responses(
        (status = 200, description = "Entrada de estoque", body = crate::models::ledger::StockInEvent),
        (status = 404, description = "Entrada não encontrada"),
    ),
    tag = "ledger"
)]
pub async fn get_stock_in(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let event = app_state.sales_service.get_stock_in(id).await?;
    Ok((StatusCode::OK, Json(event)))
}

// ---
// Saldos (CRUD cru, sem efeito de ledger)
// ---

#[utoipa::path(
    get,
    path = "/api/stock/balances",
    responses((status = 200, description = "Saldos por produto", body = [crate::models::ledger::StockBalance])),
    tag = "ledger"
)]
pub async fn list_balances(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let balances = app_state.stock_service.list_balances().await?;
    Ok((StatusCode::OK, Json(balances)))
}

#[utoipa::path(
    get,
    path = "/api/stock/balances/{product_id}",
    params(("product_id" = Uuid, Path, description = "Id do produto")),
    responses(
        (status = 200, description = "Saldo do produto", body = crate::models::ledger::StockBalance),
        (status = 404, description = "Produto sem saldo registrado"),
    ),
    tag = "ledger"
)]
pub async fn get_balance(
    State(app_state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let balance = app_state
        .stock_service
        .get_balance(&app_state.db_pool, product_id)
        .await?;
    Ok((StatusCode::OK, Json(balance)))
}

#[utoipa::path(
    put,
    path = "/api/stock/balances/{product_id}",
    params(("product_id" = Uuid, Path, description = "Id do produto")),
    request_body = StockBalancePatch,
    responses(
        (status = 200, description = "Saldo atualizado", body = crate::models::ledger::StockBalance),
        (status = 400, description = "Quantidade negativa"),
        (status = 404, description = "Produto sem saldo registrado"),
    ),
    tag = "ledger"
)]
pub async fn update_balance(
    State(app_state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(patch): Json<StockBalancePatch>,
) -> Result<impl IntoResponse, AppError> {
    let balance = app_state
        .stock_service
        .patch_balance(&app_state.db_pool, product_id, &patch)
        .await?;
    Ok((StatusCode::OK, Json(balance)))
}

#[utoipa::path(
    get,
    path = "/api/stock/movements",
    responses((status = 200, description = "Livro-razão de movimentações", body = [crate::models::ledger::StockMovement])),
    tag = "ledger"
)]
pub async fn list_movements(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let movements = app_state.stock_service.list_movements().await?;
    Ok((StatusCode::OK, Json(movements)))
}
