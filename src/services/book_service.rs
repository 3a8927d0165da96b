use crate::{
    dto::books::{BookForm, BookList},
    error::{AppError, AppResult},
    models::Book,
    repository::books,
    response::{ApiResponse, Meta},
    state::AppState,
    unit_of_work::UnitOfWork,
};

pub async fn list_books(state: &AppState) -> AppResult<ApiResponse<BookList>> {
    let items = books::find_all(&state.orm).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Books", BookList { items }, Some(meta)))
}

pub async fn get_book(state: &AppState, id: i32) -> AppResult<ApiResponse<Book>> {
    let book = match books::find_by_id(&state.orm, id).await? {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Book", book, None))
}

/// Books priced strictly above `threshold`.
pub async fn search_books(state: &AppState, threshold: i64) -> AppResult<ApiResponse<BookList>> {
    let items = books::find_by_price_greater_than(&state.orm, threshold).await?;
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Books", BookList { items }, Some(meta)))
}

pub fn new_book_form() -> ApiResponse<BookForm> {
    ApiResponse::success("New book", BookForm::default(), Some(Meta::empty()))
}

pub async fn create_book(state: &AppState, form: BookForm) -> AppResult<ApiResponse<Book>> {
    let valid = form.validate().inspect_err(|err| {
        tracing::debug!(error = %err, "book form rejected");
    })?;

    let uow = UnitOfWork::begin(&state.orm).await?;
    let book = uow.insert_book(valid).await?;
    uow.commit().await?;

    tracing::info!(book_id = book.id, "book created");

    Ok(ApiResponse::success(
        "Book created",
        book,
        Some(Meta::empty()),
    ))
}

pub async fn edit_book_form(state: &AppState, id: i32) -> AppResult<ApiResponse<BookForm>> {
    let book = match books::find_by_id(&state.orm, id).await? {
        Some(b) => b,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Edit book",
        BookForm::from(&book),
        Some(Meta::empty()),
    ))
}

pub async fn update_book(
    state: &AppState,
    id: i32,
    form: BookForm,
) -> AppResult<ApiResponse<Book>> {
    let uow = UnitOfWork::begin(&state.orm).await?;
    let current = match books::find_by_id(uow.connection(), id).await? {
        Some(b) => b,
        None => {
            uow.rollback().await?;
            return Err(AppError::NotFound);
        }
    };

    let valid = match form.validate() {
        Ok(v) => v,
        Err(err) => {
            tracing::debug!(book_id = id, error = %err, "book form rejected");
            uow.rollback().await?;
            return Err(err);
        }
    };

    let book = uow.update_book(current, valid).await?;
    uow.commit().await?;

    tracing::info!(book_id = book.id, "book updated");

    Ok(ApiResponse::success("Updated", book, Some(Meta::empty())))
}

/// Deletes the book; orders that referenced it lose that membership.
pub async fn delete_book(state: &AppState, id: i32) -> AppResult<()> {
    let uow = UnitOfWork::begin(&state.orm).await?;
    if !uow.delete_book(id).await? {
        uow.rollback().await?;
        return Err(AppError::NotFound);
    }
    uow.commit().await?;

    tracing::info!(book_id = id, "book deleted");
    Ok(())
}
