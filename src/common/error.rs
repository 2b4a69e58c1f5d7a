use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
// Taxonomia: entrada inválida (400), entidade ausente (404), conflito de
// estoque/referência (409), transação abortada pelo banco (503, retryável).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("A venda precisa de pelo menos um item")]
    EmptyItemList,

    #[error("Quantidade inválida: {0}")]
    InvalidQuantity(i64),

    #[error("Valor negativo não permitido no campo '{0}'")]
    NegativeValue(&'static str),

    #[error("Usuário não encontrado: {0}")]
    UserNotFound(Uuid),

    #[error("Cliente não encontrado: {0}")]
    CustomerNotFound(Uuid),

    #[error("Produto não encontrado: {0}")]
    ProductNotFound(Uuid),

    #[error("Venda não encontrada: {0}")]
    SaleNotFound(Uuid),

    #[error("Entrada de estoque não encontrada: {0}")]
    StockInNotFound(Uuid),

    #[error("Saldo de estoque não encontrado para o produto: {0}")]
    StockBalanceNotFound(Uuid),

    #[error("Invoice não encontrada: {0}")]
    InvoiceNotFound(Uuid),

    #[error("Pagamento não encontrado: {0}")]
    PaymentNotFound(Uuid),

    #[error(
        "Estoque insuficiente para o produto {product_id}: pedido {requested}, disponível {available}"
    )]
    InsufficientStock {
        product_id: Uuid,
        requested: i64,
        available: i64,
    },

    #[error("Registro ainda referenciado pelo histórico do ledger: {0}")]
    ReferencedByLedger(&'static str),

    #[error("Referência incoerente com a origem do registro: {0}")]
    InvalidReference(&'static str),

    // A transação atômica falhou no banco (deadlock, timeout, violação de
    // constraint, indisponibilidade). Nada foi aplicado.
    #[error("Transação abortada pelo banco de dados")]
    TransactionAborted(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Só `TransactionAborted` pode ser repetido sem mudar a entrada:
    /// o abort garante que nenhum efeito parcial ficou para trás.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::TransactionAborted(_))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::EmptyItemList
            | AppError::InvalidQuantity(_)
            | AppError::NegativeValue(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::UserNotFound(_)
            | AppError::CustomerNotFound(_)
            | AppError::ProductNotFound(_)
            | AppError::SaleNotFound(_)
            | AppError::StockInNotFound(_)
            | AppError::StockBalanceNotFound(_)
            | AppError::InvoiceNotFound(_)
            | AppError::PaymentNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::InsufficientStock { product_id, requested, available } => {
                let body = Json(json!({
                    "error": self.to_string(),
                    "productId": product_id,
                    "requested": requested,
                    "available": available,
                }));
                return (StatusCode::CONFLICT, body).into_response();
            }

            AppError::ReferencedByLedger(_) => (StatusCode::CONFLICT, self.to_string()),

            AppError::InvalidReference(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            AppError::TransactionAborted(e) => {
                tracing::error!("Transação abortada: {}", e);
                let body = Json(json!({
                    "error": "A transação foi abortada pelo banco de dados. Nada foi aplicado.",
                    "retryable": true,
                }));
                return (StatusCode::SERVICE_UNAVAILABLE, body).into_response();
            }

            AppError::InternalServerError(e) => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apenas_transacao_abortada_e_retryavel() {
        let aborted = AppError::TransactionAborted(sqlx::Error::PoolClosed);
        assert!(aborted.is_retryable());

        let insufficient = AppError::InsufficientStock {
            product_id: Uuid::nil(),
            requested: 2,
            available: 1,
        };
        assert!(!insufficient.is_retryable());
        assert!(!AppError::EmptyItemList.is_retryable());
        assert!(!AppError::ProductNotFound(Uuid::nil()).is_retryable());
    }

    #[test]
    fn mensagem_de_estoque_insuficiente_nomeia_o_produto() {
        let product_id = Uuid::new_v4();
        let err = AppError::InsufficientStock {
            product_id,
            requested: 5,
            available: 2,
        };
        assert!(err.to_string().contains(&product_id.to_string()));
    }
}
