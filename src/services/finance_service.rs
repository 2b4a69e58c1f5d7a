// src/services/finance_service.rs
//
// CRUD manual de invoices e pagamentos. Aqui NÃO existe lógica derivada:
// criar uma invoice na mão não mexe em saldo nenhum — os registros
// derivados de verdade nascem no coordenador (sales_service).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::finance::{Invoice, InvoicePatch, LedgerOrigin, Payment, PaymentPatch},
};

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  INVOICES
    // =========================================================================

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
        // Coerência estrutural antes de bater no banco; o CHECK do schema
        // é a segunda linha de defesa.
        match origin {
            LedgerOrigin::Sale => {
                if sale_id.is_none() || stock_in_id.is_some() {
                    return Err(AppError::InvalidReference(
                        "invoice de venda referencia exatamente um saleId",
                    ));
                }
            }
            LedgerOrigin::StockIn => {
                if stock_in_id.is_none() || sale_id.is_some() {
                    return Err(AppError::InvalidReference(
                        "invoice de entrada referencia exatamente um stockInId",
                    ));
                }
            }
        }

        self.repo
            .create_invoice(
                executor,
                origin,
                sale_id,
                stock_in_id,
                amount,
                gst,
                discount,
                invoice_date,
                user_id,
                customer_id,
            )
            .await
    }

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>, AppError> {
        self.repo.list_invoices().await
    }

    pub async fn get_invoice<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_invoice(executor, invoice_id)
            .await?
            .ok_or(AppError::InvoiceNotFound(invoice_id))
    }

    pub async fn update_invoice<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
        patch: &InvoicePatch,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_invoice(executor, invoice_id, patch)
            .await?
            .ok_or(AppError::InvoiceNotFound(invoice_id))
    }

    pub async fn delete_invoice<'e, E>(
        &self,
        executor: E,
        invoice_id: Uuid,
    ) -> Result<Invoice, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .delete_invoice(executor, invoice_id)
            .await?
            .ok_or(AppError::InvoiceNotFound(invoice_id))
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
        match origin {
            LedgerOrigin::Sale => {
                if invoice_id.is_none() || stock_in_id.is_some() {
                    return Err(AppError::InvalidReference(
                        "pagamento de venda referencia exatamente um invoiceId",
                    ));
                }
            }
            LedgerOrigin::StockIn => {
                if stock_in_id.is_none() || invoice_id.is_some() {
                    return Err(AppError::InvalidReference(
                        "pagamento de entrada referencia exatamente um stockInId",
                    ));
                }
            }
        }

        self.repo
            .create_payment(
                executor,
                origin,
                invoice_id,
                stock_in_id,
                amount,
                profit_loss,
                payment_date,
                user_id,
                customer_id,
            )
            .await
    }

    pub async fn list_payments(&self) -> Result<Vec<Payment>, AppError> {
        self.repo.list_payments().await
    }

    pub async fn get_payment<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_payment(executor, payment_id)
            .await?
            .ok_or(AppError::PaymentNotFound(payment_id))
    }

    pub async fn update_payment<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
        patch: &PaymentPatch,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_payment(executor, payment_id, patch)
            .await?
            .ok_or(AppError::PaymentNotFound(payment_id))
    }

    pub async fn delete_payment<'e, E>(
        &self,
        executor: E,
        payment_id: Uuid,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .delete_payment(executor, payment_id)
            .await?
            .ok_or(AppError::PaymentNotFound(payment_id))
    }
}
