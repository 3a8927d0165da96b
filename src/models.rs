use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub name: String,
    /// Amount in minor currency units.
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

/// An order and the set of books it bundles.
///
/// Books are referenced by id only; resolving them is left to the book
/// repository. Membership is a set, so adding a book twice or removing one
/// that is absent leaves the order unchanged. Nothing here is durable until
/// the order goes through a committed [`UnitOfWork`](crate::unit_of_work::UnitOfWork).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Order {
    id: Option<i32>,
    created_at: Option<DateTime<Utc>>,
    books: BTreeSet<i32>,
}

impl Order {
    /// A fresh, unsaved order with no books.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn restore(
        id: i32,
        created_at: DateTime<Utc>,
        books: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            id: Some(id),
            created_at: Some(created_at),
            books: books.into_iter().collect(),
        }
    }

    pub(crate) fn assign_identity(&mut self, id: i32, created_at: DateTime<Utc>) {
        self.id = Some(id);
        self.created_at = Some(created_at);
    }

    /// `None` until the order has been persisted.
    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn books(&self) -> &BTreeSet<i32> {
        &self.books
    }

    pub fn contains_book(&self, book_id: i32) -> bool {
        self.books.contains(&book_id)
    }

    pub fn add_book(&mut self, book_id: i32) -> &mut Self {
        if !self.contains_book(book_id) {
            self.books.insert(book_id);
        }
        self
    }

    pub fn remove_book(&mut self, book_id: i32) -> &mut Self {
        if self.contains_book(book_id) {
            self.books.remove(&book_id);
        }
        self
    }
}
