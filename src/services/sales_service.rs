// src/services/sales_service.rs
//
// Coordenador de transação dos dois fluxos compostos do ledger:
// registrar uma venda e registrar uma entrada de estoque. Cada fluxo
// roda inteiro dentro de UMA transação aberta sobre o handle recebido
// do chamador (o serviço nunca guarda conexão ambiente) — ou todos os
// efeitos (venda/evento, itens, baixas de saldo, invoice, payment)
// ficam visíveis, ou nenhum. O retorno antecipado com `?` derruba a
// transação: o Drop do `tx` faz rollback.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{Executor, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, CrmRepository, FinanceRepository, LedgerRepository},
    models::{
        finance::{Invoice, LedgerOrigin, Payment},
        ledger::{Sale, SaleItem, SaleLine, StockBalance, StockInEvent, StockMovementReason},
    },
    services::{
        pricing::{self, PricingConfig},
        stock_service::StockService,
    },
};

/// Tudo que uma venda confirmada produziu, na mesma transação.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSale {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
    pub invoice: Invoice,
}

/// Tudo que uma entrada de estoque confirmada produziu.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatedStockIn {
    pub stock_in: StockInEvent,
    pub balance: StockBalance,
    pub invoice: Invoice,
    pub payment: Payment,
}

/// Venda com seus itens, para leitura.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleDetails {
    pub sale: Sale,
    pub items: Vec<SaleItem>,
}

#[derive(Clone)]
pub struct SalesService {
    catalog_repo: CatalogRepository,
    crm_repo: CrmRepository,
    ledger_repo: LedgerRepository,
    finance_repo: FinanceRepository,
    stock_service: StockService,
    pricing: PricingConfig,
}

impl SalesService {
    pub fn new(
        catalog_repo: CatalogRepository,
        crm_repo: CrmRepository,
        ledger_repo: LedgerRepository,
        finance_repo: FinanceRepository,
        stock_service: StockService,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            catalog_repo,
            crm_repo,
            ledger_repo,
            finance_repo,
            stock_service,
            pricing,
        }
    }

    // --- REGISTRAR VENDA ---
    //
    // Validating -> Pricing -> StockCheck -> Committing, com Failed
    // alcançável de qualquer etapa (basta o `?` propagar).
    pub async fn create_sale<'e, E>(
        &self,
        executor: E,
        sale_date: NaiveDate,
        items: &[SaleLine],
    ) -> Result<CreatedSale, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        // 1. Validação estrutural, antes de abrir transação
        if items.is_empty() {
            return Err(AppError::EmptyItemList);
        }
        for item in items {
            if item.quantity <= 0 {
                return Err(AppError::InvalidQuantity(item.quantity));
            }
        }

        let mut tx = executor.begin().await?;

        // Agrega quantidades por produto. BTreeMap garante ordem estável
        // de travamento entre transações concorrentes (evita deadlock).
        let mut per_product: BTreeMap<Uuid, i64> = BTreeMap::new();
        for item in items {
            *per_product.entry(item.product_id).or_insert(0) += item.quantity;
        }

        // 2+3. Preços correntes e pre-flight de saldo, produto a produto,
        // tudo ANTES de qualquer escrita. As linhas de saldo ficam travadas
        // daqui até o commit.
        let mut prices: HashMap<Uuid, Decimal> = HashMap::new();
        for (&product_id, &needed) in &per_product {
            let product = self
                .catalog_repo
                .get_product(&mut *tx, product_id)
                .await?
                .ok_or(AppError::ProductNotFound(product_id))?;
            prices.insert(product_id, product.price);

            let available = self
                .stock_service
                .available_for_update(&mut *tx, product_id)
                .await?;
            if available < needed {
                return Err(AppError::InsufficientStock {
                    product_id,
                    requested: needed,
                    available,
                });
            }
        }

        // 4. Total congelado no momento da venda
        let total_amount = pricing::compute_sale_total(items, &prices)?;

        // 5. Escritas: venda, itens, baixas, invoice
        let sale = self
            .ledger_repo
            .create_sale(&mut *tx, sale_date, total_amount)
            .await?;

        let mut sale_items = Vec::with_capacity(items.len());
        for item in items {
            let created = self
                .ledger_repo
                .create_sale_item(&mut *tx, sale.id, item.product_id, item.quantity)
                .await?;
            sale_items.push(created);
        }

        for (&product_id, &needed) in &per_product {
            self.stock_service
                .reserve_and_apply(
                    &mut *tx,
                    product_id,
                    -needed,
                    StockMovementReason::Sale,
                    Some("Baixa por venda"),
                )
                .await?;
        }

        let invoice = self
            .finance_repo
            .create_invoice(
                &mut *tx,
                LedgerOrigin::Sale,
                Some(sale.id),
                None,
                total_amount,
                None,
                None,
                sale_date,
                None,
                None,
            )
            .await?;

        tx.commit().await?;

        tracing::info!(sale_id = %sale.id, total = %sale.total_amount, "✅ Venda registrada");

        Ok(CreatedSale {
            sale,
            items: sale_items,
            invoice,
        })
    }

    // --- REGISTRAR ENTRADA DE ESTOQUE ---
    pub async fn create_stock_in<'e, E>(
        &self,
        executor: E,
        stock_in_date: NaiveDate,
        product_id: Uuid,
        quantity: i64,
        user_id: Uuid,
        customer_id: Uuid,
    ) -> Result<CreatedStockIn, AppError>
    where
        E: Executor<'e, Database = Postgres> + sqlx::Acquire<'e, Database = Postgres>,
    {
        if quantity <= 0 {
            return Err(AppError::InvalidQuantity(quantity));
        }

        let mut tx = executor.begin().await?;

        // 1. Referências precisam existir
        let product = self
            .catalog_repo
            .get_product(&mut *tx, product_id)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))?;
        self.crm_repo
            .get_user(&mut *tx, user_id)
            .await?
            .ok_or(AppError::UserNotFound(user_id))?;
        self.crm_repo
            .get_customer(&mut *tx, customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound(customer_id))?;

        // 2+3. Valor base e detalhamento de desconto/imposto
        let base_amount = product.price * Decimal::from(quantity);
        let breakdown = pricing::compute_discount_and_tax(base_amount, &self.pricing);

        // 4. Evento, incremento de saldo, invoice e payment — juntos
        let stock_in = self
            .ledger_repo
            .create_stock_in_event(
                &mut *tx,
                stock_in_date,
                quantity,
                product_id,
                user_id,
                customer_id,
            )
            .await?;

        let balance = self
            .stock_service
            .reserve_and_apply(
                &mut *tx,
                product_id,
                quantity,
                StockMovementReason::StockIn,
                Some("Entrada de estoque"),
            )
            .await?;

        let invoice = self
            .finance_repo
            .create_invoice(
                &mut *tx,
                LedgerOrigin::StockIn,
                None,
                Some(stock_in.id),
                breakdown.net_amount,
                Some(breakdown.tax),
                Some(breakdown.discount),
                stock_in_date,
                Some(user_id),
                Some(customer_id),
            )
            .await?;

        let payment = self
            .finance_repo
            .create_payment(
                &mut *tx,
                LedgerOrigin::StockIn,
                None,
                Some(stock_in.id),
                breakdown.net_amount,
                Some(breakdown.net_amount - base_amount),
                stock_in_date,
                Some(user_id),
                Some(customer_id),
            )
            .await?;

        tx.commit().await?;

        tracing::info!(
            stock_in_id = %stock_in.id,
            product_id = %product_id,
            quantity,
            "✅ Entrada de estoque registrada"
        );

        Ok(CreatedStockIn {
            stock_in,
            balance,
            invoice,
            payment,
        })
    }

    // --- Leituras ---

    pub async fn get_sale_details(&self, sale_id: Uuid) -> Result<SaleDetails, AppError> {
        let sale = self
            .ledger_repo
            .get_sale(sale_id)
            .await?
            .ok_or(AppError::SaleNotFound(sale_id))?;
        let items = self.ledger_repo.list_sale_items(sale_id).await?;
        Ok(SaleDetails { sale, items })
    }

    pub async fn get_stock_in(&self, stock_in_id: Uuid) -> Result<StockInEvent, AppError> {
        self.ledger_repo
            .get_stock_in_event(stock_in_id)
            .await?
            .ok_or(AppError::StockInNotFound(stock_in_id))
    }

    pub async fn list_stock_ins(&self) -> Result<Vec<StockInEvent>, AppError> {
        self.ledger_repo.list_stock_in_events().await
    }
}
