use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use crate::{
    entity::{
        order_books::{Column as LinkCol, Entity as OrderBooks},
        orders::{Column as OrderCol, Entity as Orders, Model as OrderModel},
    },
    models::Order,
};

pub async fn find_all<C: ConnectionTrait>(db: &C) -> Result<Vec<Order>, DbErr> {
    let orders = Orders::find().order_by_asc(OrderCol::Id).all(db).await?;
    attach_books(db, orders).await
}

pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<Option<Order>, DbErr> {
    let Some(order) = Orders::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    Ok(attach_books(db, vec![order]).await?.pop())
}

// Loads the join rows for every order in one query and folds them into id sets.
async fn attach_books<C: ConnectionTrait>(
    db: &C,
    orders: Vec<OrderModel>,
) -> Result<Vec<Order>, DbErr> {
    if orders.is_empty() {
        return Ok(Vec::new());
    }

    let order_ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
    let links = OrderBooks::find()
        .filter(LinkCol::OrderId.is_in(order_ids))
        .all(db)
        .await?;

    let mut books_by_order: HashMap<i32, Vec<i32>> = HashMap::new();
    for link in links {
        books_by_order
            .entry(link.order_id)
            .or_default()
            .push(link.book_id);
    }

    let orders = orders
        .into_iter()
        .map(|model| {
            let books = books_by_order.remove(&model.id).unwrap_or_default();
            Order::restore(model.id, model.created_at.with_timezone(&Utc), books)
        })
        .collect();
    Ok(orders)
}
