use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity::books::{Column, Entity as Books, Model as BookModel},
    models::Book,
};

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Book>, DbErr> {
    let books = Books::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(book_from_entity)
        .collect();
    Ok(books)
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Book>, DbErr> {
    let book = Books::find_by_id(id).one(db).await?.map(book_from_entity);
    Ok(book)
}

/// Books whose id is in `ids`. Unknown ids are silently absent from the result.
pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &BTreeSet<i32>,
) -> Result<Vec<Book>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let books = Books::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(book_from_entity)
        .collect();
    Ok(books)
}

/// Books priced strictly above `threshold`.
pub async fn find_by_price_greater_than<C: ConnectionTrait>(
    db: &C,
    threshold: i64,
) -> Result<Vec<Book>, DbErr> {
    let books = Books::find()
        .filter(Column::Price.gt(threshold))
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .map(book_from_entity)
        .collect();
    Ok(books)
}

pub(crate) fn book_from_entity(model: BookModel) -> Book {
    Book {
        id: model.id,
        name: model.name,
        price: model.price,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
