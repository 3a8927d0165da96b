pub mod book_service;
pub mod order_service;
