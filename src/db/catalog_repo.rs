// src/db/catalog_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Product, ProductPatch},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras simples usam a pool principal.
    // ---

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        let products =
            sqlx::query_as::<_, Product>("SELECT * FROM products ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(products)
    }

    // ---
    // Escritas e leituras transacionais usam o padrão genérico 'Executor',
    // para poderem rodar dentro de uma transação do coordenador.
    // ---

    pub async fn get_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product =
            sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
                .bind(product_id)
                .fetch_optional(executor)
                .await?;
        Ok(product)
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
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, description)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(description)
        .fetch_one(executor)
        .await?;
        Ok(product)
    }

    /// Aplica só os campos presentes no patch (COALESCE: ausente = mantém).
    pub async fn update_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name        = COALESCE($2, name),
                price       = COALESCE($3, price),
                description = COALESCE($4, description),
                updated_at  = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(product_id)
        .bind(patch.name.as_deref())
        .bind(patch.price)
        .bind(patch.description.as_deref())
        .fetch_optional(executor)
        .await?;
        Ok(product)
    }

    /// Política de deleção: RESTRICT. Produto com histórico de estoque ou
    /// venda não pode ser apagado; o FK do banco vira um 409.
    pub async fn delete_product<'e, E>(
        &self,
        executor: E,
        product_id: Uuid,
    ) -> Result<Option<Product>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Product>("DELETE FROM products WHERE id = $1 RETURNING *")
            .bind(product_id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferencedByLedger(
                            "produto com movimentações, vendas ou saldo registrados",
                        );
                    }
                }
                e.into()
            })
    }
}
