// src/services/stock_service.rs

use sqlx::{Executor, PgConnection, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LedgerRepository,
    models::ledger::{StockBalance, StockBalancePatch, StockMovement, StockMovementReason},
};

/// Gerente de saldo: um contador não-negativo por produto.
#[derive(Clone)]
pub struct StockService {
    ledger_repo: LedgerRepository,
}

impl StockService {
    pub fn new(ledger_repo: LedgerRepository) -> Self {
        Self { ledger_repo }
    }

    /// Aplica um delta no saldo de um produto, DENTRO da transação do
    /// chamador (por isso recebe a conexão, nunca a pool).
    ///
    /// delta > 0 (entrada): cria o saldo na primeira vez, senão incrementa.
    /// delta < 0 (consumo): trava a linha, confere o disponível e só então
    /// aplica — um saldo negativo nunca fica observável.
    /// Toda mutação grava a movimentação de auditoria na mesma transação.
    pub async fn reserve_and_apply(
        &self,
        conn: &mut PgConnection,
        product_id: Uuid,
        delta: i64,
        reason: StockMovementReason,
        notes: Option<&str>,
    ) -> Result<StockBalance, AppError> {
        if delta == 0 {
            return Err(AppError::InvalidQuantity(0));
        }

        if delta < 0 {
            let available = self.available_for_update(conn, product_id).await?;
            if available + delta < 0 {
                return Err(AppError::InsufficientStock {
                    product_id,
                    requested: -delta,
                    available,
                });
            }
        }

        let balance = self
            .ledger_repo
            .apply_balance_delta(&mut *conn, product_id, delta)
            .await?;

        self.ledger_repo
            .record_movement(&mut *conn, product_id, delta, reason, notes)
            .await?;

        Ok(balance)
    }

    /// Disponível de um produto com a linha do saldo travada (FOR UPDATE)
    /// até o fim da transação corrente. Produto sem saldo conta como zero.
    pub async fn available_for_update(
        &self,
        conn: &mut PgConnection,
        product_id: Uuid,
    ) -> Result<i64, AppError> {
        let balance = self
            .ledger_repo
            .get_balance_for_update(&mut *conn, product_id)
            .await?;
        Ok(balance.map(|b| b.quantity).unwrap_or(0))
    }

    // ---
    // Superfície CRUD (dado puro, nenhum efeito de ledger)
    // ---

    pub async fn list_balances(&self) -> Result<Vec<StockBalance>, AppError> {
        self.ledger_repo.list_balances().await
    }

    pub async fn get_balance<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<StockBalance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.ledger_repo
            .get_balance(executor, product_id)
            .await?
            .ok_or(AppError::StockBalanceNotFound(product_id))
    }

    /// Edição crua do saldo. Campo ausente = mantém o valor atual.
    pub async fn patch_balance<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        patch: &StockBalancePatch,
    ) -> Result<StockBalance, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        match patch.quantity {
            Some(quantity) if quantity < 0 => Err(AppError::InvalidQuantity(quantity)),
            Some(quantity) => self
                .ledger_repo
                .set_balance_quantity(executor, product_id, quantity)
                .await?
                .ok_or(AppError::StockBalanceNotFound(product_id)),
            None => self.get_balance(executor, product_id).await,
        }
    }

    pub async fn list_movements(&self) -> Result<Vec<StockMovement>, AppError> {
        self.ledger_repo.list_movements().await
    }
}
