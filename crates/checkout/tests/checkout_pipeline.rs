//! Integration tests for the checkout pipeline.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use checkout::{
    AddressRequest, CheckoutConfig, CheckoutError, CheckoutPipeline, CheckoutRequest,
    ProductRequest, SubOrderRequest,
};
use common::{CartId, CustomerId, MerchantId, ProductId, ShippingProviderId};
use domain::{
    Address, Cart, CartItem, Credential, Customer, Merchant, Money, OrderStatus, PaymentStatus,
    Product, ShippingProvider,
};
use stores::{
    InMemoryCartStore, InMemoryCustomerStore, InMemoryMerchantStore, InMemoryOrderStore,
    InMemoryProductStore, InMemoryTransactionStore,
};
use tokio_util::sync::CancellationToken;

struct TestHarness {
    pipeline: CheckoutPipeline,
    customers: InMemoryCustomerStore,
    carts: InMemoryCartStore,
    merchants: InMemoryMerchantStore,
    products: InMemoryProductStore,
    orders: InMemoryOrderStore,
    transactions: InMemoryTransactionStore,
}

impl TestHarness {
    fn new() -> Self {
        Self::with_config(CheckoutConfig::default())
    }

    fn with_config(config: CheckoutConfig) -> Self {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init()
            .ok();

        let customers = InMemoryCustomerStore::new();
        let carts = InMemoryCartStore::new();
        let merchants = InMemoryMerchantStore::new();
        let products = InMemoryProductStore::new();
        let orders = InMemoryOrderStore::new();
        let transactions = InMemoryTransactionStore::new();

        let pipeline = CheckoutPipeline::new(
            Arc::new(customers.clone()),
            Arc::new(carts.clone()),
            Arc::new(merchants.clone()),
            Arc::new(products.clone()),
            Arc::new(orders.clone()),
            Arc::new(transactions.clone()),
            config,
        );

        Self {
            pipeline,
            customers,
            carts,
            merchants,
            products,
            orders,
            transactions,
        }
    }

    /// Seeds a customer with an empty cart and returns their credential.
    fn seed_customer(&self) -> Credential {
        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(),
            cart_id: CartId::new(),
            merchant_id: None,
            email: "siti@example.com".to_string(),
            name: "Siti".to_string(),
            phone: "+62812222222".to_string(),
            avatar: "siti.png".to_string(),
            addresses: vec![Address::new("Bandung", "Jl. Anggrek", "12A")],
            created_at: now,
            updated_at: now,
        };
        self.customers.insert(customer.clone());
        self.carts.insert(Cart {
            id: customer.cart_id,
            items: vec![],
            created_at: now,
            updated_at: now,
        });

        Credential {
            customer_id: customer.id,
            cart_id: customer.cart_id,
            merchant_id: None,
            email: customer.email,
        }
    }

    /// Seeds a merchant offering one shipping provider.
    fn seed_merchant(&self, name: &str) -> Merchant {
        let now = Utc::now();
        let merchant = Merchant {
            id: MerchantId::new(),
            name: name.to_string(),
            address: Address::new("Jakarta", "Jl. Sudirman", "1"),
            avatar: format!("{name}.png"),
            phone: "+62811111111".to_string(),
            description: "General goods".to_string(),
            rating: 4.5,
            num_reviews: 12,
            shippings: vec![ShippingProvider {
                id: ShippingProviderId::new(),
                name: "JNE".to_string(),
                created_at: now,
                updated_at: now,
            }],
            created_at: now,
            updated_at: now,
        };
        self.merchants.insert(merchant.clone());
        merchant
    }

    /// Seeds a product owned by the given merchant.
    fn seed_product(&self, merchant: &Merchant, name: &str, cents: i64) -> Product {
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(),
            name: name.to_string(),
            description: "Hand made".to_string(),
            colors: vec!["blue".to_string()],
            sizes: vec!["M".to_string()],
            photos: vec![format!("{name}.png")],
            price: Money::from_cents(cents),
            stock: 10,
            merchant: merchant.summarize(),
            rating: 4.8,
            num_reviews: 31,
            created_at: now,
            updated_at: now,
        };
        self.products.insert(product.clone());
        product
    }

    /// Puts a product into the customer's stored cart.
    fn add_to_cart(&self, credential: &Credential, product: &Product, quantity: i64) {
        let mut cart = self.carts.stored(credential.cart_id).unwrap();
        cart.items.push(CartItem {
            product: product.summarize(),
            merchant: product.merchant.clone(),
            quantity,
            colors: vec![],
            sizes: vec![],
            note: String::new(),
        });
        self.carts.insert(cart);
    }

    fn sub_order(
        merchant: &Merchant,
        shipping_cost: i64,
        products: &[(&Product, i64)],
    ) -> SubOrderRequest {
        SubOrderRequest {
            merchant_id: merchant.id,
            receiver_name: "Siti".to_string(),
            receiver_phone: "+62812222222".to_string(),
            receiver_address: AddressRequest {
                city: "Bandung".to_string(),
                street: "Jl. Anggrek".to_string(),
                number: "12A".to_string(),
            },
            shipping_id: merchant.shippings[0].id,
            shipping_cost: Money::from_cents(shipping_cost),
            service_name: "REG".to_string(),
            products: products
                .iter()
                .map(|(product, quantity)| ProductRequest {
                    product_id: product.id,
                    quantity: *quantity,
                    buyer_note: String::new(),
                    colors: vec![],
                    sizes: vec![],
                })
                .collect(),
        }
    }
}

#[tokio::test]
async fn n_sub_orders_create_n_orders_and_one_transaction() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let toko_satu = h.seed_merchant("Toko Satu");
    let toko_dua = h.seed_merchant("Toko Dua");
    let batik = h.seed_product(&toko_satu, "Batik Shirt", 1500);
    let sandal = h.seed_product(&toko_satu, "Sandal", 700);
    let kopi = h.seed_product(&toko_dua, "Kopi Gayo", 1200);

    let request = CheckoutRequest {
        orders: vec![
            TestHarness::sub_order(&toko_satu, 900, &[(&batik, 2), (&sandal, 1)]),
            TestHarness::sub_order(&toko_dua, 500, &[(&kopi, 3)]),
        ],
    };

    let orders = h
        .pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap();

    assert_eq!(orders.len(), 2);
    for order in &orders {
        assert_eq!(order.status, OrderStatus::AwaitingPayment);
        assert!(order.tracking_number.is_empty());
        assert!(!order.delivered);
    }
    // Resolved snapshots, not placeholders.
    assert_eq!(orders[0].merchant.name, "Toko Satu");
    assert_eq!(orders[0].items[0].product.name, "Batik Shirt");
    assert_eq!(orders[0].items[0].price, Money::from_cents(1500));
    assert_eq!(orders[0].shipping.name, "JNE");

    // Both orders share one transaction covering items plus shipping.
    assert_eq!(h.orders.order_count(), 2);
    assert_eq!(h.transactions.transaction_count(), 1);
    let transaction = h.transactions.transactions().remove(0);
    assert_eq!(orders[0].transaction_id, transaction.id);
    assert_eq!(orders[1].transaction_id, transaction.id);
    assert_eq!(transaction.payment_status, PaymentStatus::AwaitingVerification);
    let expected = 2 * 1500 + 700 + 3 * 1200 + 900 + 500;
    assert_eq!(transaction.total, Money::from_cents(expected));
    assert_eq!(transaction.customer_id, credential.customer_id);
}

#[tokio::test]
async fn shipping_not_offered_is_a_validation_error_and_persists_nothing() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let merchant = h.seed_merchant("Toko Satu");
    let product = h.seed_product(&merchant, "Batik Shirt", 1500);

    let mut sub_order = TestHarness::sub_order(&merchant, 900, &[(&product, 1)]);
    sub_order.shipping_id = ShippingProviderId::new();
    let request = CheckoutRequest { orders: vec![sub_order] };

    let err = h
        .pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Validation { field: "shipping_id", .. }));
    assert_eq!(h.orders.order_count(), 0);
    assert_eq!(h.transactions.transaction_count(), 0);
    assert_eq!(h.carts.update_calls(), 0);
}

#[tokio::test]
async fn foreign_product_is_not_found_and_persists_nothing() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let toko_satu = h.seed_merchant("Toko Satu");
    let toko_dua = h.seed_merchant("Toko Dua");
    // Listed under Toko Dua but requested from Toko Satu.
    let foreign = h.seed_product(&toko_dua, "Kopi Gayo", 1200);

    let request = CheckoutRequest {
        orders: vec![TestHarness::sub_order(&toko_satu, 900, &[(&foreign, 1)])],
    };

    let err = h
        .pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap_err();

    assert_eq!(err, CheckoutError::NotFound { entity: "product" });
    assert_eq!(h.orders.order_count(), 0);
    assert_eq!(h.transactions.transaction_count(), 0);
}

#[tokio::test]
async fn failing_sub_order_aborts_slower_siblings_before_they_persist() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let good = h.seed_merchant("Toko Satu");
    let bad = h.seed_merchant("Toko Dua");
    let product = h.seed_product(&good, "Batik Shirt", 1500);
    // The good sub-order resolves slowly; the bad one fails immediately and
    // must cancel the batch before the good order reaches the order store.
    h.merchants.set_delay_for(good.id, Duration::from_millis(100));

    let mut bad_sub_order = TestHarness::sub_order(&bad, 500, &[(&product, 1)]);
    bad_sub_order.shipping_id = ShippingProviderId::new();
    let request = CheckoutRequest {
        orders: vec![
            TestHarness::sub_order(&good, 900, &[(&product, 1)]),
            bad_sub_order,
        ],
    };

    let err = h
        .pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Validation { .. }));
    assert_eq!(h.orders.order_count(), 0);
    assert_eq!(h.orders.create_calls(), 0);
    assert_eq!(h.transactions.transaction_count(), 0);
}

#[tokio::test]
async fn successful_checkout_removes_purchased_items_from_cart() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let merchant = h.seed_merchant("Toko Satu");
    let bought_a = h.seed_product(&merchant, "Batik Shirt", 1500);
    let bought_b = h.seed_product(&merchant, "Sandal", 700);
    let kept = h.seed_product(&merchant, "Kopi Gayo", 1200);
    h.add_to_cart(&credential, &bought_a, 2);
    h.add_to_cart(&credential, &bought_b, 1);
    h.add_to_cart(&credential, &kept, 1);

    let request = CheckoutRequest {
        orders: vec![TestHarness::sub_order(
            &merchant,
            900,
            &[(&bought_a, 2), (&bought_b, 1)],
        )],
    };

    h.pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap();

    let cart = h.carts.stored(credential.cart_id).unwrap();
    let remaining: Vec<_> = cart.items.iter().map(|i| i.product.id).collect();
    assert_eq!(remaining, vec![kept.id]);
    // The cart is written back exactly once.
    assert_eq!(h.carts.update_calls(), 1);
}

#[tokio::test]
async fn repeating_a_checkout_creates_an_independent_second_batch() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let merchant = h.seed_merchant("Toko Satu");
    let product = h.seed_product(&merchant, "Batik Shirt", 1500);

    let request = CheckoutRequest {
        orders: vec![TestHarness::sub_order(&merchant, 900, &[(&product, 1)])],
    };

    let first = h
        .pipeline
        .create_orders(Some(&credential), request.clone())
        .await
        .unwrap();
    let second = h
        .pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap();

    // No deduplication: a second full batch with its own transaction.
    assert_ne!(first[0].id, second[0].id);
    assert_ne!(first[0].transaction_id, second[0].transaction_id);
    assert_eq!(h.orders.order_count(), 2);
    assert_eq!(h.transactions.transaction_count(), 2);
}

#[tokio::test]
async fn elapsed_deadline_makes_no_collaborator_call() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let merchant = h.seed_merchant("Toko Satu");
    let product = h.seed_product(&merchant, "Batik Shirt", 1500);

    let request = CheckoutRequest {
        orders: vec![TestHarness::sub_order(&merchant, 900, &[(&product, 1)])],
    };

    let caller = CancellationToken::new();
    caller.cancel();
    let err = h
        .pipeline
        .create_orders_with_cancel(caller, Some(&credential), request)
        .await
        .unwrap_err();

    assert_eq!(err, CheckoutError::Cancelled);
    assert_eq!(h.customers.get_calls(), 0);
    assert_eq!(h.carts.get_calls(), 0);
    assert_eq!(h.merchants.get_calls(), 0);
    assert_eq!(h.products.get_calls(), 0);
    assert_eq!(h.orders.create_calls(), 0);
    assert_eq!(h.transactions.create_calls(), 0);
}

#[tokio::test]
async fn missing_credential_is_rejected_before_any_call() {
    let h = TestHarness::new();
    let merchant = h.seed_merchant("Toko Satu");
    let product = h.seed_product(&merchant, "Batik Shirt", 1500);

    let request = CheckoutRequest {
        orders: vec![TestHarness::sub_order(&merchant, 900, &[(&product, 1)])],
    };

    let err = h.pipeline.create_orders(None, request).await.unwrap_err();

    assert_eq!(err, CheckoutError::Unauthenticated);
    assert_eq!(h.customers.get_calls(), 0);
    assert_eq!(h.carts.get_calls(), 0);
}

#[tokio::test]
async fn order_write_failure_aborts_the_batch() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let merchant = h.seed_merchant("Toko Satu");
    let product = h.seed_product(&merchant, "Batik Shirt", 1500);
    h.orders.set_fail_on_create(true);

    let request = CheckoutRequest {
        orders: vec![TestHarness::sub_order(&merchant, 900, &[(&product, 1)])],
    };

    let err = h
        .pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap_err();

    assert!(matches!(err, CheckoutError::Internal(_)));
    assert_eq!(h.orders.order_count(), 0);
    // The final cart/transaction pair is never reached.
    assert_eq!(h.transactions.create_calls(), 0);
    assert_eq!(h.carts.update_calls(), 0);
}

#[tokio::test]
async fn transaction_write_failure_leaves_persisted_orders_in_place() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let merchant = h.seed_merchant("Toko Satu");
    let product = h.seed_product(&merchant, "Batik Shirt", 1500);
    h.transactions.set_fail_on_create(true);

    let request = CheckoutRequest {
        orders: vec![TestHarness::sub_order(&merchant, 900, &[(&product, 1)])],
    };

    let err = h
        .pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap_err();

    // The failure surfaces, but orders written before it stay written: the
    // documented inconsistency window of a storage layer without
    // cross-collection transactions.
    assert!(matches!(err, CheckoutError::Internal(_)));
    assert_eq!(h.orders.order_count(), 1);
    assert_eq!(h.transactions.transaction_count(), 0);
}

#[tokio::test]
async fn results_follow_request_order_not_completion_order() {
    let h = TestHarness::new();
    let credential = h.seed_customer();
    let slow = h.seed_merchant("Toko Satu");
    let fast = h.seed_merchant("Toko Dua");
    let slow_product = h.seed_product(&slow, "Batik Shirt", 1500);
    let fast_product = h.seed_product(&fast, "Kopi Gayo", 1200);
    // The first sub-order resolves last.
    h.merchants.set_delay_for(slow.id, Duration::from_millis(50));

    let request = CheckoutRequest {
        orders: vec![
            TestHarness::sub_order(&slow, 900, &[(&slow_product, 1)]),
            TestHarness::sub_order(&fast, 500, &[(&fast_product, 1)]),
        ],
    };

    let orders = h
        .pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap();

    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].merchant.id, slow.id);
    assert_eq!(orders[1].merchant.id, fast.id);
}

#[tokio::test]
async fn mid_flight_timeout_cancels_the_batch() {
    let h = TestHarness::with_config(CheckoutConfig {
        timeout: Duration::from_millis(50),
        max_concurrent_fetches: 32,
    });
    let credential = h.seed_customer();
    let merchant = h.seed_merchant("Toko Satu");
    let product = h.seed_product(&merchant, "Batik Shirt", 1500);
    h.products.set_delay(Duration::from_millis(500));

    let request = CheckoutRequest {
        orders: vec![TestHarness::sub_order(&merchant, 900, &[(&product, 1)])],
    };

    let err = h
        .pipeline
        .create_orders(Some(&credential), request)
        .await
        .unwrap_err();

    assert_eq!(err, CheckoutError::Cancelled);
    assert_eq!(h.orders.order_count(), 0);
    assert_eq!(h.transactions.transaction_count(), 0);
}
