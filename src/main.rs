//src/main.rs

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;

use estoque_backend::{config::AppState, docs, handlers};

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Catálogo de produtos
    let catalog_routes = Router::new()
        .route(
            "/products",
            post(handlers::catalog::create_product).get(handlers::catalog::list_products),
        )
        .route(
            "/products/{id}",
            get(handlers::catalog::get_product)
                .put(handlers::catalog::update_product)
                .delete(handlers::catalog::delete_product),
        );

    // Usuários e clientes
    let crm_routes = Router::new()
        .route(
            "/users",
            post(handlers::crm::create_user).get(handlers::crm::list_users),
        )
        .route(
            "/users/{id}",
            get(handlers::crm::get_user)
                .put(handlers::crm::update_user)
                .delete(handlers::crm::delete_user),
        )
        .route(
            "/customers",
            post(handlers::crm::create_customer).get(handlers::crm::list_customers),
        )
        .route(
            "/customers/{id}",
            get(handlers::crm::get_customer)
                .put(handlers::crm::update_customer)
                .delete(handlers::crm::delete_customer),
        );

    // Fluxos do ledger: vendas, entradas, saldos e movimentações
    let ledger_routes = Router::new()
        .route("/sales", post(handlers::ledger::create_sale))
        .route("/sales/{id}", get(handlers::ledger::get_sale))
        .route(
            "/stock/entries",
            post(handlers::ledger::create_stock_in).get(handlers::ledger::list_stock_ins),
        )
        .route("/stock/entries/{id}", get(handlers::ledger::get_stock_in))
        .route("/stock/balances", get(handlers::ledger::list_balances))
        .route(
            "/stock/balances/{product_id}",
            get(handlers::ledger::get_balance).put(handlers::ledger::update_balance),
        )
        .route("/stock/movements", get(handlers::ledger::list_movements));

    // CRUD financeiro
    let finance_routes = Router::new()
        .route(
            "/invoices",
            post(handlers::finance::create_invoice).get(handlers::finance::list_invoices),
        )
        .route(
            "/invoices/{id}",
            get(handlers::finance::get_invoice)
                .put(handlers::finance::update_invoice)
                .delete(handlers::finance::delete_invoice),
        )
        .route(
            "/payments",
            post(handlers::finance::create_payment).get(handlers::finance::list_payments),
        )
        .route(
            "/payments/{id}",
            get(handlers::finance::get_payment)
                .put(handlers::finance::update_payment)
                .delete(handlers::finance::delete_payment),
        );

    // Combina tudo no router principal
    let api_routes = catalog_routes
        .merge(crm_routes)
        .merge(ledger_routes)
        .merge(finance_routes);

    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/docs/openapi.json", get(docs::openapi_json))
        .nest("/api", api_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
