// src/services/catalog_service.rs

use rust_decimal::Decimal;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::catalog::{Product, ProductPatch},
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn create_product<'e, E>(
        &self,
        executor: E,
        name: &str,
        price: Decimal,
        description: Option<&str>,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.create_product(executor, name, price, description).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.repo.list_products().await
    }

    pub async fn get_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_product(executor, product_id)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))
    }

    pub async fn update_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_product(executor, product_id, patch)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))
    }

    pub async fn delete_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Product, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .delete_product(executor, product_id)
            .await?
            .ok_or(AppError::ProductNotFound(product_id))
    }
}
