use axum_bookstore::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    dto::books::BookForm,
    repository::books,
    unit_of_work::UnitOfWork,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    if !books::find_all(&orm).await?.is_empty() {
        println!("Catalogue already populated, nothing to seed");
        return Ok(());
    }

    let catalogue = [
        ("The Rust Programming Language", 3999),
        ("Programming Rust", 5499),
        ("Rust for Rustaceans", 3499),
        ("Zero To Production In Rust", 4200),
        ("Free Sampler", 0),
    ];

    let uow = UnitOfWork::begin(&orm).await?;
    for (name, price) in catalogue {
        let form = BookForm {
            name: Some(name.into()),
            price: Some(price.into()),
        };
        let valid = form
            .validate()
            .map_err(|e| anyhow::anyhow!("seed book {name} rejected: {e}"))?;
        let book = uow.insert_book(valid).await?;
        println!("Seeded book {} (id={})", book.name, book.id);
    }
    uow.commit().await?;

    println!("Seed completed");
    Ok(())
}
