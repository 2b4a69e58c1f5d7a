pub mod pricing;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod crm_service;
pub use crm_service::CrmService;
pub mod stock_service;
pub use stock_service::StockService;
pub mod sales_service;
pub use sales_service::SalesService;
pub mod finance_service;
pub use finance_service::FinanceService;
