// src/models/ledger.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Saldo de Estoque ---
// Um registro por produto (chave única em product_id), criado de forma
// preguiçosa na primeira entrada. Invariante: quantity >= 0, sempre.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockBalance {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
    pub updated_at: DateTime<Utc>,
}

/// Patch de saldo (edição crua de dado, sem efeito de ledger).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockBalancePatch {
    pub quantity: Option<i64>,
}

// --- Entrada de Estoque ---

/// Evento imutável de recebimento de mercadoria. O efeito no saldo e os
/// registros financeiros derivados acontecem uma única vez, na transação
/// que criou o evento; editar a linha depois não re-aplica nada.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockInEvent {
    pub id: Uuid,
    pub stock_in_date: NaiveDate,
    pub quantity: i64,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
}

// --- Movimentações (Histórico) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "stock_movement_reason", rename_all = "SCREAMING_SNAKE_CASE")] // Banco
#[serde(rename_all = "SCREAMING_SNAKE_CASE")] // JSON
pub enum StockMovementReason {
    InitialStock,
    StockIn,
    Sale,
    Correction,
}

/// Linha do livro-razão de estoque: uma por mutação de saldo,
/// gravada na mesma transação da mutação.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity_changed: i64,
    pub reason: StockMovementReason,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// --- Vendas ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: Uuid,
    pub sale_date: NaiveDate,
    /// Congelado na criação: soma de (preço corrente x quantidade).
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: Uuid,
    pub sale_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// Linha de entrada do fluxo de venda (produto + quantidade pedida).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub product_id: Uuid,
    pub quantity: i64,
}
