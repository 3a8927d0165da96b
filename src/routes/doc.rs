use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        books::{BookForm, BookList},
        orders::{BookChoice, OrderForm, OrderFormView, OrderList, OrderView},
    },
    error::FieldError,
    models::Book,
    response::{ApiResponse, Meta},
    routes::{books, health, orders, params},
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        books::list_books,
        books::get_book,
        books::new_book_form,
        books::create_book,
        books::edit_book_form,
        books::update_book,
        books::delete_book,
        books::search_books,
        orders::list_orders,
        orders::order_form,
        orders::create_order
    ),
    components(
        schemas(
            Book,
            BookForm,
            BookList,
            BookChoice,
            OrderForm,
            OrderFormView,
            OrderView,
            OrderList,
            FieldError,
            params::PriceQuery,
            health::HealthData,
            Meta,
            ApiResponse<Book>,
            ApiResponse<BookList>,
            ApiResponse<BookForm>,
            ApiResponse<OrderList>,
            ApiResponse<OrderView>,
            ApiResponse<OrderFormView>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Books", description = "Book catalogue endpoints"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
