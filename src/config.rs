// src/config.rs

use std::{env, time::Duration};

use rust_decimal::Decimal;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{
    db::{CatalogRepository, CrmRepository, FinanceRepository, LedgerRepository},
    services::{
        CatalogService, CrmService, FinanceService, SalesService, StockService,
        pricing::PricingConfig,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog_service: CatalogService,
    pub crm_service: CrmService,
    pub stock_service: StockService,
    pub sales_service: SalesService,
    pub finance_service: FinanceService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // Taxas do motor de preços: padrão 10% / 18%, sobrescrevível via ambiente.
        let defaults = PricingConfig::default();
        let pricing = PricingConfig {
            discount_rate: env_rate("DISCOUNT_RATE", defaults.discount_rate)?,
            tax_rate: env_rate("TAX_RATE", defaults.tax_rate)?,
        };

        // --- Monta o gráfico de dependências ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let crm_repo = CrmRepository::new(db_pool.clone());
        let ledger_repo = LedgerRepository::new(db_pool.clone());
        let finance_repo = FinanceRepository::new(db_pool.clone());

        let stock_service = StockService::new(ledger_repo.clone());
        let sales_service = SalesService::new(
            catalog_repo.clone(),
            crm_repo.clone(),
            ledger_repo.clone(),
            finance_repo.clone(),
            stock_service.clone(),
            pricing,
        );

        Ok(Self {
            db_pool,
            catalog_service: CatalogService::new(catalog_repo),
            crm_service: CrmService::new(crm_repo),
            stock_service,
            sales_service,
            finance_service: FinanceService::new(finance_repo),
        })
    }
}

/// Lê uma taxa do ambiente; ausente = usa o padrão documentado.
fn env_rate(name: &str, default: Decimal) -> anyhow::Result<Decimal> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<Decimal>()
            .map_err(|e| anyhow::anyhow!("{name} inválida ({raw}): {e}")),
        Err(_) => Ok(default),
    }
}
