// src/handlers/finance.rs
//
// CRUD manual de invoices e pagamentos (dado puro — os registros
// derivados de verdade nascem nos fluxos de venda/entrada).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::finance::{InvoicePatch, LedgerOrigin, PaymentPatch},
};

// =========================================================================
//  INVOICES
// =========================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoicePayload {
    pub origin: LedgerOrigin,

    pub sale_id: Option<Uuid>,
    pub stock_in_id: Option<Uuid>,

    #[schema(example = "106.20")]
    pub amount: Decimal,

    pub gst: Option<Decimal>,
    pub discount: Option<Decimal>,

    #[schema(value_type = String, format = Date, example = "2025-08-07")]
    pub invoice_date: NaiveDate,

    pub user_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/invoices",
    request_body = CreateInvoicePayload,
    responses(
        (status = 201, description = "Invoice criada", body = crate::models::finance::Invoice),
        (status = 400, description = "Origem e referências incoerentes"),
    ),
    tag = "finance"
)]
pub async fn create_invoice(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateInvoicePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.amount.is_sign_negative() {
        return Err(AppError::NegativeValue("amount"));
    }

    let invoice = app_state
        .finance_service
        .create_invoice(
            &app_state.db_pool,
            payload.origin,
            payload.sale_id,
            payload.stock_in_id,
            payload.amount,
            payload.gst,
            payload.discount,
            payload.invoice_date,
            payload.user_id,
            payload.customer_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

#[utoipa::path(
    get,
    path = "/api/invoices",
    responses((status = 200, description = "Lista de invoices", body = [crate::models::finance::Invoice])),
    tag = "finance"
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let invoices = app_state.finance_service.list_invoices().await?;
    Ok((StatusCode::OK, Json(invoices)))
}

#[utoipa::path(
    get,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "Id da invoice")),
    responses(
        (status = 200, description = "Invoice", body = crate::models::finance::Invoice),
        (status = 404, description = "Invoice não encontrada"),
    ),
    tag = "finance"
)]
pub async fn get_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .finance_service
        .get_invoice(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(invoice)))
}

#[utoipa::path(
    put,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "Id da invoice")),
    request_body = InvoicePatch,
    responses(
        (status = 200, description = "Invoice atualizada", body = crate::models::finance::Invoice),
        (status = 404, description = "Invoice não encontrada"),
    ),
    tag = "finance"
)]
pub async fn update_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<InvoicePatch>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .finance_service
        .update_invoice(&app_state.db_pool, id, &patch)
        .await?;
    Ok((StatusCode::OK, Json(invoice)))
}

#[utoipa::path(
    delete,
    path = "/api/invoices/{id}",
    params(("id" = Uuid, Path, description = "Id da invoice")),
    responses(
        (status = 200, description = "Invoice removida", body = crate::models::finance::Invoice),
        (status = 409, description = "Invoice referenciada por pagamentos"),
    ),
    tag = "finance"
)]
pub async fn delete_invoice(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = app_state
        .finance_service
        .delete_invoice(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(invoice)))
}

// =========================================================================
//  PAGAMENTOS
// =========================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentPayload {
    pub origin: LedgerOrigin,

    pub invoice_id: Option<Uuid>,
    pub stock_in_id: Option<Uuid>,

    #[schema(example = "106.20")]
    pub amount: Decimal,

    pub profit_loss: Option<Decimal>,

    #[schema(value_type = String, format = Date, example = "2025-08-07")]
    pub payment_date: NaiveDate,

    pub user_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Pagamento criado", body = crate::models::finance::Payment),
        (status = 400, description = "Origem e referências incoerentes"),
    ),
    tag = "finance"
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    if payload.amount.is_sign_negative() {
        return Err(AppError::NegativeValue("amount"));
    }

    let payment = app_state
        .finance_service
        .create_payment(
            &app_state.db_pool,
            payload.origin,
            payload.invoice_id,
            payload.stock_in_id,
            payload.amount,
            payload.profit_loss,
            payload.payment_date,
            payload.user_id,
            payload.customer_id,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(payment)))
}

#[utoipa::path(
    get,
    path = "/api/payments",
    responses((status = 200, description = "Lista de pagamentos", body = [crate::models::finance::Payment])),
    tag = "finance"
)]
pub async fn list_payments(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state.finance_service.list_payments().await?;
    Ok((StatusCode::OK, Json(payments)))
}

#[utoipa::path(
    get,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Id do pagamento")),
    responses(
        (status = 200, description = "Pagamento", body = crate::models::finance::Payment),
        (status = 404, description = "Pagamento não encontrado"),
    ),
    tag = "finance"
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state
        .finance_service
        .get_payment(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(payment)))
}

#[utoipa::path(
    put,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Id do pagamento")),
    request_body = PaymentPatch,
    responses(
        (status = 200, description = "Pagamento atualizado", body = crate::models::finance::Payment),
        (status = 404, description = "Pagamento não encontrado"),
    ),
    tag = "finance"
)]
pub async fn update_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PaymentPatch>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state
        .finance_service
        .update_payment(&app_state.db_pool, id, &patch)
        .await?;
    Ok((StatusCode::OK, Json(payment)))
}

#[utoipa::path(
    delete,
    path = "/api/payments/{id}",
    params(("id" = Uuid, Path, description = "Id do pagamento")),
    responses(
        (status = 200, description = "Pagamento removido", body = crate::models::finance::Payment),
        (status = 404, description = "Pagamento não encontrado"),
    ),
    tag = "finance"
)]
pub async fn delete_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state
        .finance_service
        .delete_payment(&app_state.db_pool, id)
        .await?;
    Ok((StatusCode::OK, Json(payment)))
}
