// Vendas concorrentes sobre o mesmo produto nunca podem vender além do
// saldo (sem double-sell). Precisa de um Postgres real (DATABASE_URL).
// Rode com: cargo test -- --ignored

use chrono::NaiveDate;
use estoque_backend::{config::AppState, models::ledger::SaleLine};
use rust_decimal::Decimal;

#[tokio::test]
#[ignore]
async fn vendas_concorrentes_nao_estouram_o_saldo() {
    let state = AppState::new().await.expect("db connect");
    sqlx::migrate!()
        .run(&state.db_pool)
        .await
        .expect("migrações");

    let pool = &state.db_pool;
    let hoje = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
    let preco: Decimal = "7.00".parse().unwrap();

    let product = state
        .catalog_service
        .create_product(pool, "Produto Disputado", preco, None)
        .await
        .unwrap();
    let user = state.crm_service.create_user(pool, "Operador").await.unwrap();
    let customer = state
        .crm_service
        .create_customer(pool, "Fornecedor", "Rua E, 5", "11 95555-0000")
        .await
        .unwrap();

    // Semeia 10 unidades e dispara 20 vendas concorrentes de 1 unidade:
    // exatamente 10 devem passar, as outras 10 caem em InsufficientStock.
    state
        .sales_service
        .create_stock_in(pool, hoje, product.id, 10, user.id, customer.id)
        .await
        .unwrap();

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let service = state.sales_service.clone();
        let db = state.db_pool.clone();
        let product_id = product.id;
        tasks.push(tokio::spawn(async move {
            let items = [SaleLine { product_id, quantity: 1 }];
            service.create_sale(&db, hoje, &items).await.is_ok()
        }));
    }

    let mut sucessos = 0;
    for task in tasks {
        if task.await.unwrap_or(false) {
            sucessos += 1;
        }
    }
    assert_eq!(
        sucessos, 10,
        "exatamente 10 vendas deveriam passar; passaram {sucessos}"
    );

    // O saldo final é zero e nunca ficou negativo (CHECK do banco garante).
    let saldo = state
        .stock_service
        .get_balance(pool, product.id)
        .await
        .unwrap();
    assert_eq!(saldo.quantity, 0);

    // Uma venda registrada por sucesso, cada uma com sua invoice.
    let vendas: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sale_items WHERE product_id = $1",
    )
    .bind(product.id)
    .fetch_one(pool)
    .await
    .unwrap();
    assert_eq!(vendas, 10);
}
