use sea_orm_migration::prelude::*;

mod m20230920_000001_create_book_table;
mod m20230924_153640_create_order_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20230920_000001_create_book_table::Migration),
            Box::new(m20230924_153640_create_order_tables::Migration),
        ]
    }
}
