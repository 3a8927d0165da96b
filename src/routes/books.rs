use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::Redirect,
    routing::get,
};

use crate::{
    dto::books::{BookForm, BookList},
    error::AppResult,
    models::Book,
    response::ApiResponse,
    routes::params::PriceQuery,
    services::book_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/books", get(list_books))
        .route("/books/add", get(new_book_form).post(create_book))
        .route("/books/{id}", get(get_book))
        .route("/books/{id}/edit", get(edit_book_form).post(update_book))
        .route("/books/{id}/delete", get(delete_book))
        .route("/search/books", get(search_books))
}

#[utoipa::path(
    get,
    path = "/books",
    responses(
        (status = 200, description = "List books", body = ApiResponse<BookList>)
    ),
    tag = "Books"
)]
pub async fn list_books(State(state): State<AppState>) -> AppResult<Json<ApiResponse<BookList>>> {
    Ok(Json(book_service::list_books(&state).await?))
}

#[utoipa::path(
    get,
    path = "/books/{id}",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Get book", body = ApiResponse<Book>),
        (status = 404, description = "Book not found"),
    ),
    tag = "Books"
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<Book>>> {
    Ok(Json(book_service::get_book(&state, id).await?))
}

#[utoipa::path(
    get,
    path = "/books/add",
    responses(
        (status = 200, description = "Empty book form", body = ApiResponse<BookForm>)
    ),
    tag = "Books"
)]
pub async fn new_book_form() -> Json<ApiResponse<BookForm>> {
    Json(book_service::new_book_form())
}

#[utoipa::path(
    post,
    path = "/books/add",
    request_body = BookForm,
    responses(
        (status = 201, description = "Book created", body = ApiResponse<Book>),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "Invalid form"),
    ),
    tag = "Books"
)]
pub async fn create_book(
    State(state): State<AppState>,
    payload: Result<Json<BookForm>, JsonRejection>,
) -> AppResult<(StatusCode, Json<ApiResponse<Book>>)> {
    let Json(form) = payload?;
    let body = book_service::create_book(&state, form).await?;
    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    get,
    path = "/books/{id}/edit",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book form with current values", body = ApiResponse<BookForm>),
        (status = 404, description = "Book not found"),
    ),
    tag = "Books"
)]
pub async fn edit_book_form(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<ApiResponse<BookForm>>> {
    Ok(Json(book_service::edit_book_form(&state, id).await?))
}

#[utoipa::path(
    post,
    path = "/books/{id}/edit",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    request_body = BookForm,
    responses(
        (status = 200, description = "Updated book", body = ApiResponse<Book>),
        (status = 400, description = "Malformed JSON body"),
        (status = 404, description = "Book not found"),
        (status = 422, description = "Invalid form"),
    ),
    tag = "Books"
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<BookForm>, JsonRejection>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let Json(form) = payload?;
    Ok(Json(book_service::update_book(&state, id, form).await?))
}

#[utoipa::path(
    get,
    path = "/books/{id}/delete",
    params(
        ("id" = i32, Path, description = "Book ID")
    ),
    responses(
        (status = 303, description = "Deleted, redirects to the book list"),
        (status = 404, description = "Book not found"),
    ),
    tag = "Books"
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Redirect> {
    book_service::delete_book(&state, id).await?;
    Ok(Redirect::to("/books"))
}

#[utoipa::path(
    get,
    path = "/search/books",
    params(PriceQuery),
    responses(
        (status = 200, description = "Books priced above the threshold", body = ApiResponse<BookList>),
        (status = 422, description = "Price is not an integer"),
    ),
    tag = "Books"
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> AppResult<Json<ApiResponse<BookList>>> {
    Ok(Json(
        book_service::search_books(&state, query.threshold()?).await?,
    ))
}
