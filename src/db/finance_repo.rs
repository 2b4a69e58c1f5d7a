// src/db/finance_repo.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::finance::{Invoice, InvoicePatch, LedgerOrigin, Payment, PaymentPatch},
};

#[derive(Clone)]
pub struct FinanceRepository {
    pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  INVOICES
    // =========================================================================

    /// Insere uma invoice já com a origem resolvida. A coerência
    /// origem/referência é garantida pelo CHECK do banco; quem chama
    /// valida antes para devolver um erro legível.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_invoice<'e, E>(
        &self,
        executor: E,
        origin: LedgerOrigin,
        sale_id: Option<Uuid>,
        stock_in_id: Option<Uuid>,
        amount: Decimal,
        gst: Option<Decimal>,
        discount: Option<Decimal>,
        invoice_date: NaiveDate,
        user_id: Option<Uuid>,
        customer_id: Option<Uuid>,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices
                (origin, sale_id, stock_in_id, amount, gst, discount, invoice_date, user_id, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(origin)
        .bind(sale_id)
        .bind(stock_in_id)
        .bind(amount)
        .bind(gst)
        .bind(discount)
        .bind(invoice_date)
        .bind(user_id)
        .bind(customer_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::InvalidReference(
                        "a venda/entrada/usuário/cliente referenciado não existe",
                    );
                }
                if db_err.is_check_violation() {
                    return AppError::InvalidReference(
                        "combinação de origem e referências incoerente",
                    );
                }
            }
            e.into()
        })
    }

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        let invoices = sqlx::query_as::<_, Invoice>(
            "SELECT * FROM invoices ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(invoices)
    }

    pub async fn get_invoice<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
    ) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(invoice_id)
            .fetch_optional(executor)
            .await?;
        Ok(invoice)
    }

    /// Patch de dados puros: origem e referências não mudam depois de criadas.
    pub async fn update_invoice<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
        patch: &InvoicePatch,
    ) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET amount       = COALESCE($2, amount),
                gst          = COALESCE($3, gst),
                discount     = COALESCE($4, discount),
                invoice_date = COALESCE($5, invoice_date),
                user_id      = COALESCE($6, user_id),
                customer_id  = COALESCE($7, customer_id),
                updated_at   = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(invoice_id)
        .bind(patch.amount)
        .bind(patch.gst)
        .bind(patch.discount)
        .bind(patch.invoice_date)
        .bind(patch.user_id)
        .bind(patch.customer_id)
        .fetch_optional(executor)
        .await?;
        Ok(invoice)
    }

    pub async fn delete_invoice<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
    ) -> Result<Option<Invoice>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Invoice>("DELETE FROM invoices WHERE id = $1 RETURNING *")
            .bind(invoice_id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferencedByLedger(
                            "invoice referenciada por pagamentos",
                        );
                    }
                }
                e.into()
            })
    }

    // =========================================================================
    //  PAGAMENTOS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_payment<'e, E>(
        &self,
        executor: E,
        origin: LedgerOrigin,
        invoice_id: Option<Uuid>,
        stock_in_id: Option<Uuid>,
        amount: Decimal,
        profit_loss: Option<Decimal>,
        payment_date: NaiveDate,
        user_id: Option<Uuid>,
        customer_id: Option<Uuid>,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments
                (origin, invoice_id, stock_in_id, amount, profit_loss, payment_date, user_id, customer_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(origin)
        .bind(invoice_id)
        .bind(stock_in_id)
        .bind(amount)
        .bind(profit_loss)
        .bind(payment_date)
        .bind(user_id)
        .bind(customer_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return AppError::InvalidReference(
                        "a invoice/entrada/usuário/cliente referenciado não existe",
                    );
                }
                if db_err.is_check_violation() {
                    return AppError::InvalidReference(
                        "combinação de origem e referências incoerente",
                    );
                }
            }
            e.into()
        })
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(payments)
    }

    pub async fn get_payment<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
    ) -> Result<Option<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1")
            .bind(payment_id)
            .fetch_optional(executor)
            .await?;
        Ok(payment)
    }

    pub async fn update_payment<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
        patch: &PaymentPatch,
    ) -> Result<Option<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET amount       = COALESCE($2, amount),
                profit_loss  = COALESCE($3, profit_loss),
                payment_date = COALESCE($4, payment_date),
                user_id      = COALESCE($5, user_id),
                customer_id  = COALESCE($6, customer_id),
                updated_at   = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(payment_id)
        .bind(patch.amount)
        .bind(patch.profit_loss)
        .bind(patch.payment_date)
        .bind(patch.user_id)
        .bind(patch.customer_id)
        .fetch_optional(executor)
        .await?;
        Ok(payment)
    }

    pub async fn delete_payment<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
    ) -> Result<Option<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment =
            sqlx::query_as::<_, Payment>("DELETE FROM payments WHERE id = $1 RETURNING *")
                .bind(payment_id)
                .fetch_optional(executor)
                .await?;
        Ok(payment)
    }
}
