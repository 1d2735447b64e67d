use actor_framework::{ActorClient, Predicate};
use rust_decimal::Decimal;
use storefront::lifecycle::{StoreSystem, SystemConfig};
use storefront::model::{
    CustomerId, Order, OrderEvent, OrderStatus, ProductCreate, ProductId, ProductUpdate,
    QuantityChange,
};
use storefront::order_actor::OrderError;
use storefront::product_actor::ProductError;

fn money(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

/// Full end-to-end run with real actors: cart, checkout, kitchen, archive.
#[tokio::test]
async fn test_cart_to_archive_scenario() {
    let system = StoreSystem::new(SystemConfig::default());
    let catalog = system.catalog();
    let storefront = system.storefront();
    let kanban = system.kanban();
    let ana = CustomerId(1);

    let a = catalog
        .add_product(ProductCreate::new("A", "", money(1000)))
        .await
        .expect("Failed to create product A");
    let b = catalog
        .add_product(ProductCreate::new("B", "", money(500)))
        .await
        .expect("Failed to create product B");

    storefront.add_item(ana, a.id).await.unwrap();
    storefront.add_item(ana, a.id).await.unwrap();
    let cart = storefront.add_item(ana, b.id).await.unwrap();

    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.total_items, 3);
    assert_eq!(cart.total_price, money(2500));
    assert_eq!(storefront.cart_item_count(ana).await.unwrap(), 3);

    let order = storefront.submit_cart(ana).await.unwrap();
    assert!(order.finalized);
    assert_eq!(order.status, OrderStatus::Submitted);
    assert_eq!(order.id, cart.id);

    let board = kanban.accept(order.id).await.unwrap();
    assert_eq!(board.locate(order.id), Some(OrderStatus::Preparing));
    kanban.dispatch(order.id).await.unwrap();
    let board = kanban.deliver(order.id).await.unwrap();
    assert_eq!(board.locate(order.id), Some(OrderStatus::Delivered));

    let report = kanban.archive_delivered().await.unwrap();
    assert_eq!(report.archived, 1);
    assert_eq!(report.board.locate(order.id), None);

    let history = storefront.list_my_orders(ana).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, OrderStatus::Archived);

    drop((catalog, storefront, kanban));
    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_concurrent_cart_creation_yields_one_cart() {
    let system = StoreSystem::new(SystemConfig::default());
    let storefront = system.storefront();
    let ana = CustomerId(7);

    let mut handles = vec![];
    for _ in 0..25 {
        let storefront = storefront.clone();
        handles.push(tokio::spawn(async move {
            storefront.get_or_create_cart(ana).await
        }));
    }

    let mut ids = vec![];
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1, "every caller must get the same cart");
}

#[tokio::test]
async fn test_concurrent_add_item_merges_into_one_line() {
    let system = StoreSystem::new(SystemConfig::default());
    let storefront = system.storefront();
    let soup = system
        .catalog()
        .add_product(ProductCreate::new("Soup", "", money(450)))
        .await
        .unwrap()
        .id;
    let ana = CustomerId(1);

    let mut handles = vec![];
    for _ in 0..10 {
        let storefront = storefront.clone();
        handles.push(tokio::spawn(async move {
            storefront.add_item(ana, soup).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let cart = storefront.get_or_create_cart(ana).await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 10);
    assert_eq!(cart.total_price, money(4500));
}

#[tokio::test]
async fn test_decrementing_below_one_removes_the_item() {
    let system = StoreSystem::new(SystemConfig::default());
    let storefront = system.storefront();
    let tea = system
        .catalog()
        .add_product(ProductCreate::new("Tea", "", money(200)))
        .await
        .unwrap();
    let ana = CustomerId(1);

    let cart = storefront.add_item(ana, tea.id).await.unwrap();
    let item = cart.items[0].id;
    let cart = storefront
        .change_quantity(ana, item, QuantityChange::Decrement)
        .await
        .unwrap();
    assert!(cart.item_for(tea.id).is_none());

    let again = storefront
        .change_quantity(ana, item, QuantityChange::Decrement)
        .await;
    assert!(matches!(again, Err(OrderError::NotFound(_))));
}

#[tokio::test]
async fn test_empty_cart_submit_is_rejected() {
    let system = StoreSystem::new(SystemConfig::default());
    let storefront = system.storefront();
    let ana = CustomerId(1);

    assert!(matches!(
        storefront.submit_cart(ana).await,
        Err(OrderError::NotFound(_))
    ));

    let cart = storefront.get_or_create_cart(ana).await.unwrap();
    assert_eq!(
        storefront.submit_cart(ana).await,
        Err(OrderError::EmptyCart(cart.id))
    );
    let still_open = storefront.get_or_create_cart(ana).await.unwrap();
    assert_eq!(still_open.id, cart.id);
    assert!(!still_open.finalized);
}

#[tokio::test]
async fn test_submit_starts_a_fresh_cart() {
    let system = StoreSystem::new(SystemConfig::default());
    let storefront = system.storefront();
    let tea = system
        .catalog()
        .add_product(ProductCreate::new("Tea", "", money(200)))
        .await
        .unwrap();
    let ana = CustomerId(1);

    storefront.add_item(ana, tea.id).await.unwrap();
    let first = storefront.submit_cart(ana).await.unwrap();

    let next = storefront.add_item(ana, tea.id).await.unwrap();
    assert_ne!(next.id, first.id);
    assert!(!next.finalized);
    assert_eq!(next.total_items, 1);

    let old = storefront.get_order(ana, first.id).await.unwrap();
    assert_eq!(old.total_items, 1, "submitted items are history");
}

#[tokio::test]
async fn test_deleted_product_leaves_tombstone() {
    let system = StoreSystem::new(SystemConfig::default());
    let catalog = system.catalog();
    let storefront = system.storefront();
    let ana = CustomerId(1);

    let gone = catalog
        .add_product(ProductCreate::new("Seasonal", "", money(900)))
        .await
        .unwrap();
    let kept = catalog
        .add_product(ProductCreate::new("Rice", "", money(300)))
        .await
        .unwrap();
    storefront.add_item(ana, gone.id).await.unwrap();
    storefront.add_item(ana, kept.id).await.unwrap();
    let order = storefront.submit_cart(ana).await.unwrap();

    catalog.delete_product(gone.id).await.unwrap();
    assert!(matches!(
        catalog.find_product(gone.id).await,
        Err(ProductError::NotFound(_))
    ));

    let order = storefront.get_order(ana, order.id).await.unwrap();
    assert_eq!(order.items.len(), 2);
    let tombstone = order
        .items
        .iter()
        .find(|i| i.product.is_none())
        .expect("tombstone kept");
    assert_eq!(tombstone.subtotal, Decimal::ZERO);
    assert_eq!(order.total_price, money(300));
}

#[tokio::test]
async fn test_inactive_and_unknown_products_cannot_be_ordered() {
    let system = StoreSystem::new(SystemConfig::default());
    let catalog = system.catalog();
    let storefront = system.storefront();
    let soup = catalog
        .add_product(ProductCreate::new("Soup", "", money(450)))
        .await
        .unwrap();
    catalog
        .edit_product(
            soup.id,
            ProductUpdate {
                active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(catalog.list_active_products(None).await.unwrap().is_empty());
    assert_eq!(catalog.list_products().await.unwrap().len(), 1);
    assert!(matches!(
        storefront.add_item(CustomerId(1), soup.id).await,
        Err(OrderError::NotFound(_))
    ));
    assert!(matches!(
        storefront
            .add_item(CustomerId(1), ProductId(99))
            .await,
        Err(OrderError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_customers_cannot_see_each_others_orders() {
    let system = StoreSystem::new(SystemConfig::default());
    let storefront = system.storefront();
    let tea = system
        .catalog()
        .add_product(ProductCreate::new("Tea", "", money(200)))
        .await
        .unwrap();

    let cart = storefront.add_item(CustomerId(1), tea.id).await.unwrap();
    let item = cart.items[0].id;
    assert!(matches!(
        storefront.remove_item(CustomerId(2), item).await,
        Err(OrderError::NotFound(_))
    ));
    let order = storefront.submit_cart(CustomerId(1)).await.unwrap();
    assert!(matches!(
        storefront.get_order(CustomerId(2), order.id).await,
        Err(OrderError::NotFound(_))
    ));
    assert!(storefront
        .list_my_orders(CustomerId(2))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_illegal_transitions_are_rejected() {
    let system = StoreSystem::new(SystemConfig::default());
    let storefront = system.storefront();
    let kanban = system.kanban();
    let tea = system
        .catalog()
        .add_product(ProductCreate::new("Tea", "", money(200)))
        .await
        .unwrap();
    let ana = CustomerId(1);

    let cart = storefront.add_item(ana, tea.id).await.unwrap();
    assert!(
        matches!(kanban.accept(cart.id).await, Err(OrderError::NotFound(_))),
        "a cart is not on the board"
    );

    let order = storefront.submit_cart(ana).await.unwrap();
    assert_eq!(
        kanban.deliver(order.id).await,
        Err(OrderError::InvalidTransition {
            from: OrderStatus::Submitted,
            event: OrderEvent::Deliver,
        })
    );

    kanban.decline(order.id).await.unwrap();
    let board = kanban.decline(order.id).await.unwrap();
    assert!(board.is_empty(), "declined orders leave the board");
    assert!(kanban.accept(order.id).await.is_err());
    assert_eq!(
        kanban.order_details(order.id).await.unwrap().status,
        OrderStatus::Declined
    );
}

#[tokio::test]
async fn test_delivered_window_caps_the_board() {
    let system = StoreSystem::new(SystemConfig {
        delivered_window: 2,
        ..SystemConfig::default()
    });
    let storefront = system.storefront();
    let kanban = system.kanban();
    let tea = system
        .catalog()
        .add_product(ProductCreate::new("Tea", "", money(200)))
        .await
        .unwrap();

    let mut delivered = vec![];
    for customer in 1..=3 {
        let customer = CustomerId(customer);
        storefront.add_item(customer, tea.id).await.unwrap();
        let order = storefront.submit_cart(customer).await.unwrap();
        kanban.accept(order.id).await.unwrap();
        kanban.dispatch(order.id).await.unwrap();
        kanban.deliver(order.id).await.unwrap();
        delivered.push(order.id);
    }

    let board = kanban.refresh_view().await.unwrap();
    let shown: Vec<_> = board.delivered.iter().map(|o| o.id).collect();
    assert_eq!(shown, vec![delivered[2], delivered[1]]);
}

#[tokio::test]
async fn test_dashboard_counts_todays_orders() {
    let system = StoreSystem::new(SystemConfig::default());
    let storefront = system.storefront();
    let catalog = system.catalog();
    let tea = catalog
        .add_product(ProductCreate::new("Tea", "", money(200)))
        .await
        .unwrap();
    let cake = catalog
        .add_product(ProductCreate::new("Cake", "", money(450)))
        .await
        .unwrap();

    for customer in 1..=2 {
        let customer = CustomerId(customer);
        storefront.add_item(customer, tea.id).await.unwrap();
        storefront.add_item(customer, tea.id).await.unwrap();
        storefront.add_item(customer, cake.id).await.unwrap();
        storefront.submit_cart(customer).await.unwrap();
    }
    // an open cart is not an order
    storefront.add_item(CustomerId(3), cake.id).await.unwrap();

    let stats = system
        .dashboard()
        .dashboard(chrono::Utc::now())
        .await
        .unwrap();
    assert_eq!(stats.orders_today, 2);
    assert_eq!(stats.orders_this_year, 2);
    assert_eq!(stats.top_products[0].name, "Tea");
    assert_eq!(stats.top_products[0].quantity, 4);
    assert_eq!(stats.top_products[1].quantity, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_add_item_racing_checkout_never_loses_the_item() {
    let system = StoreSystem::new(SystemConfig::default());
    let storefront = system.storefront();
    let tea = system
        .catalog()
        .add_product(ProductCreate::new("Tea", "", money(200)))
        .await
        .unwrap()
        .id;

    for round in 0..200 {
        let customer = CustomerId(round);
        storefront.add_item(customer, tea).await.unwrap();

        let adder = storefront.clone();
        let add = tokio::spawn(async move { adder.add_item(customer, tea).await });
        let submitter = storefront.clone();
        let submit = tokio::spawn(async move { submitter.submit_cart(customer).await });

        let added = add.await.unwrap().expect("add_item must land in some open cart");
        submit.await.unwrap().unwrap();

        // the unit is either in the submitted order or in a fresh cart
        let orders = storefront.list_my_orders(customer).await.unwrap();
        let cart = storefront.get_or_create_cart(customer).await.unwrap();
        let submitted: u32 = orders.iter().map(|o| o.total_items).sum();
        assert_eq!(submitted + cart.total_items, 2, "round {round}");
        assert!(added.id == cart.id || added.id == orders[0].id);
    }

    let open_carts = system
        .order_client
        .list(Predicate::new(|o: &Order| o.is_cart()))
        .await
        .unwrap();
    assert_eq!(open_carts.len(), 200, "one open cart per customer");
}
