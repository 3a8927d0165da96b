pub mod books;
pub mod order_books;
pub mod orders;

pub use books::Entity as Books;
pub use order_books::Entity as OrderBooks;
pub use orders::Entity as Orders;
