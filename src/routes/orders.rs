use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::orders::{OrderForm, OrderFormView, OrderList, OrderView},
    error::AppResult,
    response::ApiResponse,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/order/create", get(order_form).post(create_order))
}

#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "List orders with their books", body = ApiResponse<OrderList>)
    ),
    tag = "Orders"
)]
pub async fn list_orders(State(state): State<AppState>) -> AppResult<Json<ApiResponse<OrderList>>> {
    Ok(Json(order_service::list_orders(&state).await?))
}

#[utoipa::path(
    get,
    path = "/order/create",
    responses(
        (status = 200, description = "Selectable books for a new order", body = ApiResponse<OrderFormView>)
    ),
    tag = "Orders"
)]
pub async fn order_form(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<OrderFormView>>> {
    Ok(Json(order_service::order_form(&state).await?))
}

#[utoipa::path(
    post,
    path = "/order/create",
    request_body = OrderForm,
    responses(
        (status = 201, description = "Order created", body = ApiResponse<OrderView>),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Unknown book selected"),
    ),
    tag = "Orders"
)]
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<OrderView>>)> {
    let Json(form) = payload?;
    let body = order_service::create_order(&state, form).await?;
    Ok((StatusCode::CREATED, Json(body)))
}
