pub mod books;
pub mod orders;
