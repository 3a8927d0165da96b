//! Read-only queries. Every function is generic over the connection so it can
//! run on the pool or inside an open [`UnitOfWork`](crate::unit_of_work::UnitOfWork).

pub mod books;
pub mod orders;
