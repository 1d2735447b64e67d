//! Demo run: seeds a small menu, lets two customers order, and walks one order across the
//! kitchen board. Set `RUST_LOG=info` (or `debug`) to watch the actors work.

use rust_decimal::Decimal;
use storefront::lifecycle::{setup_tracing, StoreSystem, SystemConfig};
use storefront::model::{CustomerId, ProductCreate, QuantityChange};
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let system = StoreSystem::new(SystemConfig::load());
    run(&system).await.map_err(|e| e.to_string())?;
    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}

async fn run(system: &StoreSystem) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = system.catalog();
    let storefront = system.storefront();
    let kanban = system.kanban();

    let ramen = catalog
        .add_product(ProductCreate::new("Ramen", "Pork broth", Decimal::new(1000, 2)))
        .await?;
    let gyoza = catalog
        .add_product(ProductCreate::new("Gyoza", "Six pieces", Decimal::new(500, 2)))
        .await?;
    info!(products = catalog.list_active_products(None).await?.len(), "Menu ready");

    let ana = CustomerId(1);
    let bob = CustomerId(2);

    let order = async {
        storefront.add_item(ana, ramen.id).await?;
        storefront.add_item(ana, ramen.id).await?;
        let cart = storefront.add_item(ana, gyoza.id).await?;
        info!(total_items = cart.total_items, total_price = %cart.total_price, "Cart filled");
        storefront.submit_cart(ana).await
    }
    .instrument(tracing::info_span!("checkout", customer = %ana))
    .await?;

    let cart = storefront.add_item(bob, gyoza.id).await?;
    let item = cart.items[0].id;
    storefront
        .change_quantity(bob, item, QuantityChange::Increment)
        .await?;
    storefront.submit_cart(bob).await?;

    let board = async {
        kanban.accept(order.id).await?;
        kanban.dispatch(order.id).await?;
        kanban.deliver(order.id).await
    }
    .instrument(tracing::info_span!("kitchen", order_id = %order.id))
    .await?;
    println!("{}", serde_json::to_string_pretty(&board)?);

    let report = kanban.archive_delivered().await?;
    info!(archived = report.archived, on_board = report.board.len(), "Board archived");

    let stats = system.dashboard().dashboard(chrono::Utc::now()).await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
