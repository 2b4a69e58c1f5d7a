// src/services/crm_service.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CrmRepository,
    models::crm::{Customer, CustomerPatch, User, UserPatch},
};

#[derive(Clone)]
pub struct CrmService {
    repo: CrmRepository,
}

impl CrmService {
    pub fn new(repo: CrmRepository) -> Self {
        Self { repo }
    }

    // =========================================================================
    //  USUÁRIOS
    // =========================================================================

    pub async fn create_user<'e, E>(&self, executor: E, name: &str) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.create_user(executor, name).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.repo.list_users().await
    }

    pub async fn get_user<'e, E>(&self, executor: E, user_id: Uuid) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_user(executor, user_id)
            .await?
            .ok_or(AppError::UserNotFound(user_id))
    }

    pub async fn update_user<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        patch: &UserPatch,
    ) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_user(executor, user_id, patch)
            .await?
            .ok_or(AppError::UserNotFound(user_id))
    }

    pub async fn delete_user<'e, E>(&self, executor: E, user_id: Uuid) -> Result<User, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .delete_user(executor, user_id)
            .await?
            .ok_or(AppError::UserNotFound(user_id))
    }

    // =========================================================================
    //  CLIENTES
    // =========================================================================

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
        self.repo.create_customer(executor, name, address, phone).await
    }

    pub async fn list_customers(&self) -> Result<Vec<Customer>, AppError> {
        self.repo.list_customers().await
    }

    pub async fn get_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_customer(executor, customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound(customer_id))
    }

    pub async fn update_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
        patch: &CustomerPatch,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .update_customer(executor, customer_id, patch)
            .await?
            .ok_or(AppError::CustomerNotFound(customer_id))
    }

    pub async fn delete_customer<'e, E>(
        &self,
        executor: E,
        customer_id: Uuid,
    ) -> Result<Customer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .delete_customer(executor, customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound(customer_id))
    }
}
