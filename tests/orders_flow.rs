use std::collections::BTreeSet;

use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use axum_bookstore::{
    db::{create_orm_conn, run_migrations},
    dto::{books::BookForm, orders::OrderForm},
    error::AppError,
    models::{Book, Order},
    repository::orders,
    routes::create_app,
    services::{book_service, order_service},
    state::AppState,
    unit_of_work::UnitOfWork,
};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState { orm })
}

async fn create_book(state: &AppState, name: &str, price: i64) -> anyhow::Result<Book> {
    let resp = book_service::create_book(
        state,
        BookForm {
            name: Some(name.into()),
            price: Some(price.into()),
        },
    )
    .await?;
    Ok(resp.data.expect("created book"))
}

fn ids(items: &[i32]) -> BTreeSet<i32> {
    items.iter().copied().collect()
}

// Integration flow: pick books -> create order -> reload -> list with resolved books.
#[tokio::test]
async fn order_reloads_with_the_submitted_book_set() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let b1 = create_book(&state, "Dune", 1299).await?;
    let b2 = create_book(&state, "Emma", 850).await?;
    create_book(&state, "Ulysses", 1500).await?;

    let created = order_service::create_order(
        &state,
        OrderForm {
            books: Some(json!([b2.id, b1.id, b2.id])),
        },
    )
    .await?;
    assert_eq!(created.message, "Order created successfully");
    let view = created.data.expect("order view");
    assert_eq!(view.books.len(), 2);

    let reloaded = orders::find_by_id(&state.orm, view.id)
        .await?
        .expect("persisted order");
    assert_eq!(reloaded.books(), &ids(&[b1.id, b2.id]));

    let list = order_service::list_orders(&state).await?;
    let items = list.data.expect("orders").items;
    assert_eq!(items.len(), 1);
    let names: BTreeSet<String> = items[0].books.iter().map(|b| b.name.clone()).collect();
    let expected: BTreeSet<String> = ["Dune", "Emma"].into_iter().map(String::from).collect();
    assert_eq!(names, expected);
    Ok(())
}

#[tokio::test]
async fn unknown_book_rejects_the_whole_order() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let book = create_book(&state, "Dune", 1299).await?;

    let result = order_service::create_order(
        &state,
        OrderForm {
            books: Some(json!([book.id, 9999])),
        },
    )
    .await;
    match result {
        Err(AppError::Validation(fields)) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "books");
        }
        other => panic!("expected validation error, got {other:?}"),
    }

    assert!(orders::find_all(&state.orm).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn empty_selection_creates_an_empty_order() -> anyhow::Result<()> {
    let state = setup_state().await?;

    let view = order_service::create_order(&state, OrderForm::default())
        .await?
        .data
        .expect("order view");
    assert!(view.books.is_empty());

    let reloaded = orders::find_by_id(&state.orm, view.id).await?.expect("order");
    assert!(reloaded.books().is_empty());
    Ok(())
}

#[tokio::test]
async fn rolled_back_unit_of_work_persists_nothing() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let book = create_book(&state, "Dune", 1299).await?;

    let uow = UnitOfWork::begin(&state.orm).await?;
    let mut order = Order::new();
    order.add_book(book.id);
    uow.persist_order(&mut order).await?;
    assert!(order.id().is_some());

    // Visible inside the unit of work before commit.
    let pending = orders::find_all(uow.connection()).await?;
    assert_eq!(pending.len(), 1);

    uow.rollback().await?;
    assert!(orders::find_all(&state.orm).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn persisting_an_existing_order_replaces_membership() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let b1 = create_book(&state, "Dune", 1299).await?;
    let b2 = create_book(&state, "Emma", 850).await?;
    let b3 = create_book(&state, "Ulysses", 1500).await?;

    let view = order_service::create_order(
        &state,
        OrderForm {
            books: Some(json!([b1.id, b2.id])),
        },
    )
    .await?
    .data
    .expect("order view");

    let mut order = orders::find_by_id(&state.orm, view.id)
        .await?
        .expect("order");
    order.remove_book(b1.id).add_book(b3.id).add_book(b3.id);

    let uow = UnitOfWork::begin(&state.orm).await?;
    uow.persist_order(&mut order).await?;
    uow.commit().await?;

    let reloaded = orders::find_by_id(&state.orm, view.id)
        .await?
        .expect("order");
    assert_eq!(reloaded.books(), &ids(&[b2.id, b3.id]));
    assert_eq!(orders::find_all(&state.orm).await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn deleting_a_book_drops_it_from_orders() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let b1 = create_book(&state, "Dune", 1299).await?;
    let b2 = create_book(&state, "Emma", 850).await?;

    let view = order_service::create_order(
        &state,
        OrderForm {
            books: Some(json!([b1.id, b2.id])),
        },
    )
    .await?
    .data
    .expect("order view");

    book_service::delete_book(&state, b1.id).await?;

    let books = book_service::list_books(&state).await?.data.expect("books").items;
    assert!(books.iter().all(|b| b.id != b1.id));

    let reloaded = orders::find_by_id(&state.orm, view.id)
        .await?
        .expect("order survives");
    assert_eq!(reloaded.books(), &ids(&[b2.id]));

    let listed = order_service::list_orders(&state).await?.data.expect("orders").items;
    assert_eq!(listed[0].books.len(), 1);
    assert_eq!(listed[0].books[0].id, b2.id);
    Ok(())
}

#[tokio::test]
async fn order_routes_over_http() -> anyhow::Result<()> {
    let state = setup_state().await?;
    let book = create_book(&state, "Dune", 1299).await?;

    let response = create_app(state.clone())
        .oneshot(Request::builder().uri("/order/create").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(
        body["data"]["choices"],
        json!([{ "value": book.id, "label": "Dune" }])
    );

    let response = create_app(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/order/create")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "books": [book.id] }).to_string()))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = create_app(state.clone())
        .oneshot(Request::builder().uri("/orders").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["books"][0]["name"], "Dune");
    Ok(())
}

#[tokio::test]
async fn mistyped_selection_is_reported_against_books() -> anyhow::Result<()> {
    let state = setup_state().await?;
    create_book(&state, "Dune", 1299).await?;

    let response = create_app(state.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/order/create")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "books": ["x"] }).to_string()))?,
        )
        .await?;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await?)?;
    assert_eq!(body["data"]["fields"][0]["field"], "books");
    assert_eq!(body["data"]["fields"][0]["message"], "This value is not valid.");

    assert!(orders::find_all(&state.orm).await?.is_empty());
    Ok(())
}
