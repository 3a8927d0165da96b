use sea_orm_migration::{prelude::*, schema::*};

use super::m20230920_000001_create_book_table::Book;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(pk_auto(Order::Id))
                    .col(timestamp_with_time_zone(Order::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OrderBooks::Table)
                    .if_not_exists()
                    .col(integer(OrderBooks::OrderId))
                    .col(integer(OrderBooks::BookId))
                    .primary_key(
                        Index::create()
                            .col(OrderBooks::OrderId)
                            .col(OrderBooks::BookId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_books_order_id")
                            .from(OrderBooks::Table, OrderBooks::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_order_books_book_id")
                            .from(OrderBooks::Table, OrderBooks::BookId)
                            .to(Book::Table, Book::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_order_books_order_id")
                    .table(OrderBooks::Table)
                    .col(OrderBooks::OrderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_order_books_book_id")
                    .table(OrderBooks::Table)
                    .col(OrderBooks::BookId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OrderBooks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Order::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Order {
    Table,
    Id,
    CreatedAt,
}

#[derive(DeriveIden)]
enum OrderBooks {
    Table,
    OrderId,
    BookId,
}
