use std::collections::{BTreeSet, HashMap};

use crate::{
    dto::orders::{BookChoice, OrderForm, OrderFormView, OrderList, OrderView},
    error::{AppError, AppResult, FieldError},
    models::{Book, Order},
    repository::{books, orders},
    response::{ApiResponse, Meta},
    state::AppState,
    unit_of_work::UnitOfWork,
};

pub async fn list_orders(state: &AppState) -> AppResult<ApiResponse<OrderList>> {
    let orders = orders::find_all(&state.orm).await?;

    let referenced: BTreeSet<i32> = orders
        .iter()
        .flat_map(|o| o.books().iter().copied())
        .collect();
    let catalogue: HashMap<i32, Book> = books::find_by_ids(&state.orm, &referenced)
        .await?
        .into_iter()
        .map(|b| (b.id, b))
        .collect();

    let items = orders
        .iter()
        .map(|order| order_view(order, &catalogue))
        .collect::<AppResult<Vec<OrderView>>>()?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn order_form(state: &AppState) -> AppResult<ApiResponse<OrderFormView>> {
    let choices = books::find_all(&state.orm)
        .await?
        .iter()
        .map(BookChoice::from)
        .collect();
    Ok(ApiResponse::success(
        "New order",
        OrderFormView {
            choices,
            form: OrderForm::default(),
        },
        Some(Meta::empty()),
    ))
}

pub async fn create_order(state: &AppState, form: OrderForm) -> AppResult<ApiResponse<OrderView>> {
    let requested = form.selected().inspect_err(|err| {
        tracing::debug!(error = %err, "order form rejected");
    })?;

    let uow = UnitOfWork::begin(&state.orm).await?;
    let selected = books::find_by_ids(uow.connection(), &requested).await?;
    if selected.len() != requested.len() {
        tracing::debug!(requested = requested.len(), found = selected.len(), "order form rejected");
        uow.rollback().await?;
        return Err(AppError::Validation(vec![FieldError::invalid("books")]));
    }

    let mut order = Order::new();
    for book in &selected {
        order.add_book(book.id);
    }
    uow.persist_order(&mut order).await?;
    uow.commit().await?;

    let catalogue: HashMap<i32, Book> = selected.into_iter().map(|b| (b.id, b)).collect();
    let view = order_view(&order, &catalogue)?;

    tracing::info!(order_id = view.id, books = view.books.len(), "order created");

    Ok(ApiResponse::success(
        "Order created successfully",
        view,
        Some(Meta::empty()),
    ))
}

// Only persisted orders have a view; an unsaved one is a programming error.
fn order_view(order: &Order, catalogue: &HashMap<i32, Book>) -> AppResult<OrderView> {
    let (Some(id), Some(created_at)) = (order.id(), order.created_at()) else {
        return Err(anyhow::anyhow!("order has not been persisted").into());
    };
    let books = order
        .books()
        .iter()
        .filter_map(|book_id| catalogue.get(book_id).cloned())
        .collect();
    Ok(OrderView {
        id,
        created_at,
        books,
    })
}
