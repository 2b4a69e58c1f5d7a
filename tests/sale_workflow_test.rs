// Testes de integração dos fluxos do ledger. Precisam de um Postgres
// real apontado por DATABASE_URL (as migrações rodam no setup).
// Rode com: cargo test -- --ignored

use chrono::NaiveDate;
use estoque_backend::{
    common::error::AppError,
    config::AppState,
    models::{finance::LedgerOrigin, ledger::SaleLine},
};
use rust_decimal::Decimal;

fn dec(value: &str) -> Decimal {
    value.parse().unwrap()
}

fn hoje() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 7).unwrap()
}

async fn setup() -> AppState {
    let app_state = AppState::new().await.expect("db connect");
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("migrações");
    app_state
}

#[tokio::test]
#[ignore]
async fn entrada_de_estoque_cria_saldo_invoice_e_payment() {
    let state = setup().await;
    let pool = &state.db_pool;

    let product = state
        .catalog_service
        .create_product(pool, "Produto Entrada", dec("10.00"), None)
        .await
        .unwrap();
    let user = state.crm_service.create_user(pool, "Operador").await.unwrap();
    let customer = state
        .crm_service
        .create_customer(pool, "Fornecedor", "Rua A, 1", "11 99999-0000")
        .await
        .unwrap();

    // Primeira entrada: o saldo nasce com a quantidade do evento
    let created = state
        .sales_service
        .create_stock_in(pool, hoje(), product.id, 10, user.id, customer.id)
        .await
        .unwrap();

    assert_eq!(created.balance.quantity, 10);
    assert_eq!(created.stock_in.quantity, 10);

    // base = 10 x 10.00 = 100.00 -> desconto 10.00, gst 16.20, líquido 106.20
    assert_eq!(created.invoice.origin, LedgerOrigin::StockIn);
    assert_eq!(created.invoice.amount, dec("106.20"));
    assert_eq!(created.invoice.gst, Some(dec("16.20")));
    assert_eq!(created.invoice.discount, Some(dec("10.00")));

    assert_eq!(created.payment.amount, dec("106.20"));
    assert_eq!(created.payment.profit_loss, Some(dec("6.20")));
    assert_eq!(created.payment.stock_in_id, Some(created.stock_in.id));

    // Segunda entrada: incrementa exatamente a quantidade
    let second = state
        .sales_service
        .create_stock_in(pool, hoje(), product.id, 5, user.id, customer.id)
        .await
        .unwrap();
    assert_eq!(second.balance.quantity, 15);
}

#[tokio::test]
#[ignore]
async fn venda_congela_total_cria_itens_invoice_e_baixa_saldo() {
    let state = setup().await;
    let pool = &state.db_pool;

    let caneta = state
        .catalog_service
        .create_product(pool, "Caneta", dec("2.50"), None)
        .await
        .unwrap();
    let caderno = state
        .catalog_service
        .create_product(pool, "Caderno", dec("12.00"), None)
        .await
        .unwrap();
    let user = state.crm_service.create_user(pool, "Operador").await.unwrap();
    let customer = state
        .crm_service
        .create_customer(pool, "Fornecedor", "Rua B, 2", "11 98888-0000")
        .await
        .unwrap();

    state
        .sales_service
        .create_stock_in(pool, hoje(), caneta.id, 100, user.id, customer.id)
        .await
        .unwrap();
    state
        .sales_service
        .create_stock_in(pool, hoje(), caderno.id, 20, user.id, customer.id)
        .await
        .unwrap();

    let items = vec![
        SaleLine { product_id: caneta.id, quantity: 4 },
        SaleLine { product_id: caderno.id, quantity: 2 },
    ];
    let created = state
        .sales_service
        .create_sale(pool, hoje(), &items)
        .await
        .unwrap();

    // total = 4 x 2.50 + 2 x 12.00 = 34.00
    assert_eq!(created.sale.total_amount, dec("34.00"));
    assert_eq!(created.items.len(), 2);

    // exatamente uma invoice, com o mesmo valor e data da venda
    assert_eq!(created.invoice.origin, LedgerOrigin::Sale);
    assert_eq!(created.invoice.sale_id, Some(created.sale.id));
    assert_eq!(created.invoice.amount, dec("34.00"));
    assert_eq!(created.invoice.invoice_date, created.sale.sale_date);

    // saldos baixados exatamente pelas quantidades vendidas
    let saldo_caneta = state.stock_service.get_balance(pool, caneta.id).await.unwrap();
    let saldo_caderno = state.stock_service.get_balance(pool, caderno.id).await.unwrap();
    assert_eq!(saldo_caneta.quantity, 96);
    assert_eq!(saldo_caderno.quantity, 18);
}

#[tokio::test]
#[ignore]
async fn venda_sem_estoque_falha_sem_deixar_rastro() {
    let state = setup().await;
    let pool = &state.db_pool;

    let product = state
        .catalog_service
        .create_product(pool, "Produto Raro", dec("50.00"), None)
        .await
        .unwrap();
    let user = state.crm_service.create_user(pool, "Operador").await.unwrap();
    let customer = state
        .crm_service
        .create_customer(pool, "Fornecedor", "Rua C, 3", "11 97777-0000")
        .await
        .unwrap();

    state
        .sales_service
        .create_stock_in(pool, hoje(), product.id, 1, user.id, customer.id)
        .await
        .unwrap();

    let items = vec![SaleLine { product_id: product.id, quantity: 2 }];
    let err = state
        .sales_service
        .create_sale(pool, hoje(), &items)
        .await
        .unwrap_err();

    match err {
        AppError::InsufficientStock { product_id, requested, available } => {
            assert_eq!(product_id, product.id);
            assert_eq!(requested, 2);
            assert_eq!(available, 1);
        }
        other => panic!("esperava InsufficientStock, veio {other:?}"),
    }

    // saldo intacto
    let saldo = state.stock_service.get_balance(pool, product.id).await.unwrap();
    assert_eq!(saldo.quantity, 1);

    // nenhuma linha parcial ficou para trás
    let sale_items: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sale_items WHERE product_id = $1",
    )
    .bind(product.id)
    .fetch_one(pool)
    .await
    .unwrap();
    assert_eq!(sale_items, 0);

    let invoices: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM invoices i JOIN sales s ON s.id = i.sale_id \
         JOIN sale_items si ON si.sale_id = s.id WHERE si.product_id = $1",
    )
    .bind(product.id)
    .fetch_one(pool)
    .await
    .unwrap();
    assert_eq!(invoices, 0);

    // a movimentação de venda também não existe
    let movimentos_de_venda: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM stock_movements WHERE product_id = $1 AND reason = 'SALE'",
    )
    .bind(product.id)
    .fetch_one(pool)
    .await
    .unwrap();
    assert_eq!(movimentos_de_venda, 0);
}

#[tokio::test]
#[ignore]
async fn venda_vazia_e_produto_inexistente_sao_rejeitados() {
    let state = setup().await;
    let pool = &state.db_pool;

    let err = state
        .sales_service
        .create_sale(pool, hoje(), &[])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::EmptyItemList));

    let fantasma = uuid::Uuid::new_v4();
    let items = vec![SaleLine { product_id: fantasma, quantity: 1 }];
    let err = state
        .sales_service
        .create_sale(pool, hoje(), &items)
        .await
        .unwrap_err();
    match err {
        AppError::ProductNotFound(id) => assert_eq!(id, fantasma),
        other => panic!("esperava ProductNotFound, veio {other:?}"),
    }
}

#[tokio::test]
#[ignore]
async fn deletar_produto_com_historico_e_restrito() {
    let state = setup().await;
    let pool = &state.db_pool;

    let product = state
        .catalog_service
        .create_product(pool, "Produto Histórico", dec("5.00"), None)
        .await
        .unwrap();
    let user = state.crm_service.create_user(pool, "Operador").await.unwrap();
    let customer = state
        .crm_service
        .create_customer(pool, "Fornecedor", "Rua D, 4", "11 96666-0000")
        .await
        .unwrap();

    state
        .sales_service
        .create_stock_in(pool, hoje(), product.id, 3, user.id, customer.id)
        .await
        .unwrap();

    let err = state
        .catalog_service
        .delete_product(pool, product.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ReferencedByLedger(_)));
}
