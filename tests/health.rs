use axum::extract::State;
use axum_bookstore::{
    db::{create_orm_conn, run_migrations},
    routes::health::health_check,
    state::AppState,
};

#[tokio::test]
async fn health_check_returns_ok() -> anyhow::Result<()> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;

    let response = health_check(State(AppState { orm })).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "up");
    Ok(())
}
