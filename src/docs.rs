// src/docs.rs

use axum::Json;
use utoipa::OpenApi;

use crate::{handlers, models, services};

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catálogo ---
        handlers::catalog::create_product,
        handlers::catalog::list_products,
        handlers::catalog::get_product,
        handlers::catalog::update_product,
        handlers::catalog::delete_product,

        // --- CRM ---
        handlers::crm::create_user,
        handlers::crm::list_users,
        handlers::crm::get_user,
        handlers::crm::update_user,
        handlers::crm::delete_user,
        handlers::crm::create_customer,
        handlers::crm::list_customers,
        handlers::crm::get_customer,
        handlers::crm::update_customer,
        handlers::crm::delete_customer,

        // --- Ledger (vendas e estoque) ---
        handlers::ledger::create_sale,
        handlers::ledger::get_sale,
        handlers::ledger::create_stock_in,
        handlers::ledger::list_stock_ins,
        handlers::ledger::get_stock_in,
        handlers::ledger::list_balances,
        handlers::ledger::get_balance,
        handlers::ledger::update_balance,
        handlers::ledger::list_movements,

        // --- Financeiro ---
        handlers::finance::create_invoice,
        handlers::finance::list_invoices,
        handlers::finance::get_invoice,
        handlers::finance::update_invoice,
        handlers::finance::delete_invoice,
        handlers::finance::create_payment,
        handlers::finance::list_payments,
        handlers::finance::get_payment,
        handlers::finance::update_payment,
        handlers::finance::delete_payment,
    ),
    components(
        schemas(
            models::catalog::Product,
            models::catalog::ProductPatch,
            models::crm::User,
            models::crm::UserPatch,
            models::crm::Customer,
            models::crm::CustomerPatch,
            models::ledger::StockBalance,
            models::ledger::StockBalancePatch,
            models::ledger::StockInEvent,
            models::ledger::StockMovement,
            models::ledger::StockMovementReason,
            models::ledger::Sale,
            models::ledger::SaleItem,
            models::ledger::SaleLine,
            models::finance::LedgerOrigin,
            models::finance::Invoice,
            models::finance::InvoicePatch,
            models::finance::Payment,
            models::finance::PaymentPatch,
            services::sales_service::CreatedSale,
            services::sales_service::CreatedStockIn,
            services::sales_service::SaleDetails,
        )
    ),
    tags(
        (name = "catalog", description = "Catálogo de produtos"),
        (name = "crm", description = "Usuários e clientes"),
        (name = "ledger", description = "Estoque, vendas e movimentações"),
        (name = "finance", description = "Invoices e pagamentos"),
    )
)]
pub struct ApiDoc;

/// Documento OpenAPI servido como JSON puro.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
