// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

/// Qual evento iniciador produziu o registro financeiro: uma venda ou
/// uma entrada de estoque. As duas variantes carregam referências e
/// campos diferentes (ver CHECK de coerência no schema).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "ledger_origin", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LedgerOrigin {
    Sale,
    StockIn,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    pub origin: LedgerOrigin,

    /// Preenchido na variante SALE.
    pub sale_id: Option<Uuid>,
    /// Preenchido na variante STOCK_IN.
    pub stock_in_id: Option<Uuid>,

    #[schema(example = "106.20")]
    pub amount: Decimal,

    /// Detalhamento de imposto (só na variante STOCK_IN).
    pub gst: Option<Decimal>,
    /// Detalhamento de desconto (só na variante STOCK_IN).
    pub discount: Option<Decimal>,

    #[schema(value_type = String, format = Date, example = "2025-08-07")]
    pub invoice_date: NaiveDate,

    pub user_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Patch parcial de invoice: campo ausente = "não mexer".
/// Edições aqui são dado puro, nenhum efeito de ledger é re-aplicado.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePatch {
    pub amount: Option<Decimal>,
    pub gst: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub invoice_date: Option<NaiveDate>,
    pub user_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,

    pub origin: LedgerOrigin,

    /// Preenchido na variante SALE.
    pub invoice_id: Option<Uuid>,
    /// Preenchido na variante STOCK_IN.
    pub stock_in_id: Option<Uuid>,

    #[schema(example = "106.20")]
    pub amount: Decimal,

    /// net_amount - valor base, só na variante STOCK_IN.
    pub profit_loss: Option<Decimal>,

    #[schema(value_type = String, format = Date, example = "2025-08-07")]
    pub payment_date: NaiveDate,

    pub user_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPatch {
    pub amount: Option<Decimal>,
    pub profit_loss: Option<Decimal>,
    pub payment_date: Option<NaiveDate>,
    pub user_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
}
