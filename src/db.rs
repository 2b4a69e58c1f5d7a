pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod crm_repo;
pub use crm_repo::CrmRepository;
pub mod ledger_repo;
pub use ledger_repo::LedgerRepository;
pub mod finance_repo;
pub use finance_repo::FinanceRepository;
