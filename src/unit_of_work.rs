use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use sea_orm::ActiveValue::{NotSet, Unchanged};

use crate::{
    dto::books::ValidBook,
    entity::{
        books::{ActiveModel as BookActive, Entity as Books},
        order_books::{ActiveModel as LinkActive, Column as LinkCol, Entity as OrderBooks},
        orders::ActiveModel as OrderActive,
    },
    models::{Book, Order},
    repository::books::book_from_entity,
};

/// Request-scoped persistence context.
///
/// All writes of one request go through a single transaction. Nothing is
/// visible outside it until [`commit`](Self::commit); dropping the value
/// without committing rolls everything back.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DbErr> {
        let txn = db.begin().await?;
        Ok(Self { txn })
    }

    /// Connection for reads that must see this unit's pending writes.
    pub fn connection(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn insert_book(&self, book: ValidBook) -> Result<Book, DbErr> {
        let model = BookActive {
            id: NotSet,
            name: Set(book.name),
            price: Set(book.price),
            created_at: Set(Utc::now().into()),
        }
        .insert(&self.txn)
        .await?;
        Ok(book_from_entity(model))
    }

    /// Applies `changes` to a book already loaded through this unit of work.
    pub async fn update_book(&self, current: Book, changes: ValidBook) -> Result<Book, DbErr> {
        let model = BookActive {
            id: Unchanged(current.id),
            name: Set(changes.name),
            price: Set(changes.price),
            created_at: Unchanged(current.created_at.into()),
        }
        .update(&self.txn)
        .await?;
        Ok(book_from_entity(model))
    }

    /// Deletes the book and drops it from every order that referenced it.
    /// Returns `false` when no book has this id.
    pub async fn delete_book(&self, id: i32) -> Result<bool, DbErr> {
        OrderBooks::delete_many()
            .filter(LinkCol::BookId.eq(id))
            .exec(&self.txn)
            .await?;
        let result = Books::delete_by_id(id).exec(&self.txn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Writes the order row (new orders only) and replaces its join rows
    /// with the current membership. A new order gets its id assigned here.
    pub async fn persist_order(&self, order: &mut Order) -> Result<(), DbErr> {
        let order_id = match order.id() {
            Some(id) => {
                OrderBooks::delete_many()
                    .filter(LinkCol::OrderId.eq(id))
                    .exec(&self.txn)
                    .await?;
                id
            }
            None => {
                let model = OrderActive {
                    id: NotSet,
                    created_at: Set(Utc::now().into()),
                }
                .insert(&self.txn)
                .await?;
                order.assign_identity(model.id, model.created_at.with_timezone(&Utc));
                model.id
            }
        };

        if order.books().is_empty() {
            return Ok(());
        }

        let links = order.books().iter().map(|&book_id| LinkActive {
            order_id: Set(order_id),
            book_id: Set(book_id),
        });
        OrderBooks::insert_many(links)
            .exec_without_returning(&self.txn)
            .await?;
        Ok(())
    }

    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }

    pub async fn rollback(self) -> Result<(), DbErr> {
        self.txn.rollback().await
    }
}
