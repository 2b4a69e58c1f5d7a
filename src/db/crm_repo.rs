// src/db/crm_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::crm::{Customer, CustomerPatch, User, UserPatch},
};

#[derive(Clone)]
pub struct CrmRepository {
    pool: PgPool,
}

impl CrmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  USUÁRIOS (Operadores)
    // =========================================================================

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn get_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(executor)
            .await?;
        Ok(user)
    }

    pub async fn create_user<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user =
            sqlx::query_as::<_, User>("INSERT INTO users (name) VALUES ($1) RETURNING *")
                .bind(name)
                .fetch_one(executor)
                .await?;
        Ok(user)
    }

    pub async fn update_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        patch: &UserPatch,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name       = COALESCE($2, name),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(patch.name.as_deref())
        .fetch_optional(executor)
        .await?;
        Ok(user)
    }

    pub async fn delete_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
    ) -> Result<Option<User>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, User>("DELETE FROM users WHERE id = $1 RETURNING *")
            .bind(user_id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferencedByLedger(
                            "usuário referenciado por entradas, invoices ou pagamentos",
                        );
                    }
                }
                e.into()
            })
    }

    // =========================================================================
    //  CLIENTES (Contrapartes)
    // =========================================================================

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        let customers =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(customers)
    }

    pub async fn get_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1")
                .bind(customer_id)
                .fetch_optional(executor)
                .await?;
        Ok(customer)
    }

    pub async fn create_customer<'e, E>(
        &self,
        executor: E,
        name: &str,
        address: &str,
        phone: &str,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (name, address, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(phone)
        .fetch_one(executor)
        .await?;
        Ok(customer)
    }

    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET name       = COALESCE($2, name),
                address    = COALESCE($3, address),
                phone      = COALESCE($4, phone),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(customer_id)
        .bind(patch.name.as_deref())
        .bind(patch.address.as_deref())
        .bind(patch.phone.as_deref())
        .fetch_optional(executor)
        .await?;
        Ok(customer)
    }

    pub async fn delete_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<Option<Customer>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Customer>("DELETE FROM customers WHERE id = $1 RETURNING *")
            .bind(customer_id)
            .fetch_optional(executor)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e {
                    if db_err.is_foreign_key_violation() {
                        return AppError::ReferencedByLedger(
                            "cliente referenciado por entradas, invoices ou pagamentos",
                        );
                    }
                }
                e.into()
            })
    }
}
