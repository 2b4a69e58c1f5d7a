// src/db/ledger_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::ledger::{
        Sale, SaleItem, StockBalance, StockInEvent, StockMovement, StockMovementReason,
    },
};

#[derive(Clone)]
pub struct LedgerRepository {
    pool: PgPool,
}

impl LedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  SALDOS DE ESTOQUE
    // =========================================================================

    pub async fn list_balances(&self) -> Result<Vec<StockBalance>, AppError> {
        let balances = sqlx::query_as::<_, StockBalance>(
            "SELECT * FROM stock_balances ORDER BY product_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(balances)
    }

    pub async fn get_balance<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Option<StockBalance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balance = sqlx::query_as::<_, StockBalance>(
            "SELECT * FROM stock_balances WHERE product_id = $1",
        )
        .bind(product_id)
        .fetch_optional(executor)
        .await?;
        Ok(balance)
    }

    /// Trava a linha do saldo (FOR UPDATE) até o fim da transação corrente.
    /// É isso que serializa fluxos concorrentes sobre o mesmo produto:
    /// ninguém mais lê-modifica-escreve este saldo enquanto a trava vive.
    pub async fn get_balance_for_update<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Option<StockBalance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balance = sqlx::query_as::<_, StockBalance>(
            "SELECT * FROM stock_balances WHERE product_id = $1 FOR UPDATE",
        )
        .bind(product_id)
        .fetch_optional(executor)
        .await?;
        Ok(balance)
    }

    /// UPSERT atômico do saldo: cria a linha na primeira entrada,
    /// soma (ou subtrai) o delta nas seguintes. O CHECK (quantity >= 0)
    /// do banco é a última linha de defesa contra saldo negativo.
    pub async fn apply_balance_delta<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        delta: i64,
    ) -> Result<StockBalance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balance = sqlx::query_as::<_, StockBalance>(
            r#"
            INSERT INTO stock_balances (product_id, quantity)
            VALUES ($1, $2)
            ON CONFLICT (product_id)
            DO UPDATE SET
                quantity   = stock_balances.quantity + EXCLUDED.quantity,
                updated_at = now()
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(delta)
        .fetch_one(executor)
        .await?;
        Ok(balance)
    }

    /// Edição crua do saldo (CRUD), sem efeito de ledger.
    pub async fn set_balance_quantity<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity: i64,
    ) -> Result<Option<StockBalance>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let balance = sqlx::query_as::<_, StockBalance>(
            r#"
            UPDATE stock_balances
            SET quantity = $2, updated_at = now()
            WHERE product_id = $1
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity)
        .fetch_optional(executor)
        .await?;
        Ok(balance)
    }

    // =========================================================================
    //  MOVIMENTAÇÕES (Histórico)
    // =========================================================================

    /// Registra uma movimentação no livro-razão (auditoria).
    pub async fn record_movement<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        quantity_changed: i64,
        reason: StockMovementReason,
        notes: Option<&str>,
    ) -> Result<StockMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, StockMovement>(
            r#"
            INSERT INTO stock_movements (product_id, quantity_changed, reason, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(quantity_changed)
        .bind(reason)
        .bind(notes)
        .fetch_one(executor)
        .await?;
        Ok(movement)
    }

    pub async fn list_movements(&self) -> Result<Vec<StockMovement>, AppError> {
        let movements = sqlx::query_as::<_, StockMovement>(
            "SELECT * FROM stock_movements ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(movements)
    }

    // =========================================================================
    //  ENTRADAS DE ESTOQUE (Eventos)
    // =========================================================================

    pub async fn create_stock_in_event<'e, E>(
        &self,
        executor: E,
        stock_in_date: NaiveDate,
        quantity: i64,
        product_id: Uuid,
        user_id: Uuid,
        customer_id: Uuid,
    ) -> Result<StockInEvent, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let event = sqlx::query_as::<_, StockInEvent>(
            r#"
            INSERT INTO stock_in_events (stock_in_date, quantity, product_id, user_id, customer_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(stock_in_date)
        .bind(quantity)
        .bind(product_id)
        .bind(user_id)
        .bind(customer_id)
        .fetch_one(executor)
        .await?;
        Ok(event)
    }

    pub async fn get_stock_in_event(
        &self,
        stock_in_id: Uuid,
    ) -> Result<Option<StockInEvent>, AppError> {
        let event = sqlx::query_as::<_, StockInEvent>(
            "SELECT * FROM stock_in_events WHERE id = $1",
        )
        .bind(stock_in_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(event)
    }

    pub async fn list_stock_in_events(&self) -> Result<Vec<StockInEvent>, AppError> {
        let events = sqlx::query_as::<_, StockInEvent>(
            "SELECT * FROM stock_in_events ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    // =========================================================================
    //  VENDAS
    // =========================================================================

    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        sale_date: NaiveDate,
        total_amount: Decimal,
    ) -> Result<Sale, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sale = sqlx::query_as::<_, Sale>(
            r#"
            INSERT INTO sales (sale_date, total_amount)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(sale_date)
        .bind(total_amount)
        .fetch_one(executor)
        .await?;
        Ok(sale)
    }

    pub async fn create_sale_item<'e, E>(
        &self,
        executor: E,
        sale_id: Uuid,
        product_id: Uuid,
        quantity: i64,
    ) -> Result<SaleItem, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let item = sqlx::query_as::<_, SaleItem>(
            r#"
            INSERT INTO sale_items (sale_id, product_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(sale_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(executor)
        .await?;
        Ok(item)
    }

    pub async fn get_sale(&self, sale_id: Uuid) -> Result<Option<Sale>, AppError> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = $1")
            .bind(sale_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(sale)
    }

    pub async fn list_sale_items(&self, sale_id: Uuid) -> Result<Vec<SaleItem>, AppError> {
        let items = sqlx::query_as::<_, SaleItem>(
            "SELECT * FROM sale_items WHERE sale_id = $1 ORDER BY created_at ASC",
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }
}
