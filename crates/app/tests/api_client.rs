use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, patch, post},
};
use reqwest::Url;
use serde_json::{Value, json};
use testresult::TestResult;
use tokio::net::TcpListener;

use storefront::prelude::ProductId;
use storefront_app::{
    api::{ApiClient, ApiError, Endpoint},
    auth::{AuthService, Credentials, HttpAuthService, Registration, VerificationCode},
    domain::{
        carts::{CartsService, HttpCartsService},
        notifications::{HttpNotificationsService, NotificationsService, models::NotificationId},
        orders::{HttpOrdersService, OrdersService},
        products::{HttpProductsService, ProductsService},
        reviews::{HttpReviewsService, ReviewsService, models::Rating},
    },
    session::{BearerToken, MemoryTokenStore, SessionContext},
};

#[derive(Clone, Default)]
struct Stub {
    authorization: Arc<Mutex<Vec<Option<String>>>>,
    hits: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl Stub {
    fn record(&self, headers: &HeaderMap) {
        self.hits.fetch_add(1, Ordering::SeqCst);

        let value = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        if let Ok(mut seen) = self.authorization.lock() {
            seen.push(value);
        }
    }

    fn seen(&self) -> Vec<Option<String>> {
        self.authorization
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }

    fn keep(&self, request: Value) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request);
        }
    }

    fn kept(&self) -> Vec<Value> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

async fn cart_with_one_line(State(stub): State<Stub>, headers: HeaderMap) -> Json<Value> {
    stub.record(&headers);

    Json(json!({
        "success": true,
        "data": [{
            "_id": "l1",
            "quantity": 2,
            "productId": { "_id": "p1", "name": "Kettle", "image": ["kettle.png"], "price": 1000 }
        }]
    }))
}

async fn empty_cart(State(stub): State<Stub>, headers: HeaderMap) -> Json<Value> {
    stub.record(&headers);

    Json(json!({ "success": false, "error": true, "message": "cart item is empty" }))
}

async fn unauthorized(State(stub): State<Stub>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    stub.record(&headers);

    (StatusCode::UNAUTHORIZED, Json(json!({ "message": "jwt expired" })))
}

async fn reject_order(State(stub): State<Stub>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    stub.record(&headers);

    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": true, "message": "Address not found" })),
    )
}

async fn login(State(stub): State<Stub>, headers: HeaderMap) -> Json<Value> {
    stub.record(&headers);

    Json(json!({ "success": true, "data": { "accessToken": "fresh-token" } }))
}

async fn register(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record(&headers);
    stub.keep(body);

    Json(json!({ "success": true, "error": false, "message": "User registered successfully" }))
}

async fn duplicate_user(State(stub): State<Stub>, headers: HeaderMap) -> Json<Value> {
    stub.record(&headers);

    Json(json!({ "success": false, "error": true, "message": "User already exists" }))
}

async fn verify_email(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record(&headers);
    stub.keep(body);

    Json(json!({ "success": true, "message": "Email verified" }))
}

async fn search_category(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    stub.record(&headers);
    stub.keep(body);

    Json(json!({ "success": true, "data": { "_id": "c1", "name": "Kitchen" } }))
}

async fn products(State(stub): State<Stub>, headers: HeaderMap, RawQuery(query): RawQuery) -> Json<Value> {
    stub.record(&headers);
    stub.keep(json!(query));

    Json(json!({
        "success": true,
        "data": [
            { "_id": "p1", "name": "Kettle", "image": ["kettle.png"], "price": 1000 },
            { "_id": "p2", "name": "Toaster", "image": [], "price": 1499.5 }
        ]
    }))
}

async fn product_reviews(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(product): Path<String>,
) -> Json<Value> {
    stub.record(&headers);
    stub.keep(json!(product));

    Json(json!({
        "reviews": [{ "_id": "r1", "name": "Asha", "rating": 4, "comment": "Boils fast" }],
        "average": 4,
        "total": 1,
        "distribution": { "5": 0, "4": 1, "3": 0, "2": 0, "1": 0 }
    }))
}

async fn read_notification(
    State(stub): State<Stub>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Json<Value> {
    stub.record(&headers);

    Json(json!({ "success": true, "data": { "_id": id, "message": "Order shipped", "read": true } }))
}

async fn spawn(router: Router) -> TestResult<Url> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        _ = axum::serve(listener, router).await;
    });

    Ok(Url::parse(&format!("http://{addr}"))?)
}

fn client(base_url: Url, token: Option<&str>) -> TestResult<ApiClient> {
    let token = token.map(BearerToken::parse).transpose()?;
    let session = SessionContext::load(Arc::new(MemoryTokenStore::new(token)))?;

    Ok(ApiClient::new(base_url, Duration::from_secs(5), session)?)
}

#[tokio::test]
async fn bearer_token_is_attached() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/cart/get", get(cart_with_one_line))
        .with_state(stub.clone());

    let api = client(spawn(router).await?, Some("abc"))?;
    let carts = HttpCartsService::new(api, rusty_money::iso::INR);

    let snapshot = carts.get_cart().await?;

    assert_eq!(snapshot.cart.len(), 1);
    assert_eq!(stub.seen(), vec![Some("Bearer abc".to_string())]);

    Ok(())
}

#[tokio::test]
async fn empty_cart_message_is_an_empty_cart() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/cart/get", get(empty_cart))
        .with_state(stub.clone());

    let api = client(spawn(router).await?, Some("abc"))?;
    let snapshot = HttpCartsService::new(api, rusty_money::iso::INR).get_cart().await?;

    assert!(snapshot.cart.is_empty());
    assert!(snapshot.unavailable.is_empty());

    Ok(())
}

#[tokio::test]
async fn unauthorized_expires_session_and_blocks_requests() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/order/getuser", get(unauthorized))
        .with_state(stub.clone());

    let api = client(spawn(router).await?, Some("stale"))?;
    let session = api.session().clone();
    let orders = HttpOrdersService::new(api, rusty_money::iso::INR);

    session.set_location("/orders");

    let first = orders.list_orders().await;

    assert!(matches!(first, Err(ApiError::Unauthorized)));
    assert!(!session.is_authenticated());
    assert!(session.is_expired());

    let second = orders.list_orders().await;

    assert!(matches!(second, Err(ApiError::SessionExpired)));
    assert_eq!(stub.hits.load(Ordering::SeqCst), 1);
    assert_eq!(session.take_return_path().as_deref(), Some("/orders"));

    Ok(())
}

#[tokio::test]
async fn backend_message_is_surfaced() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/order/create", post(reject_order))
        .with_state(stub.clone());

    let api = client(spawn(router).await?, Some("abc"))?;

    let result = api.call_with(&Endpoint::CreateOrder, &json!({})).await;

    match result {
        Err(error @ ApiError::Rejected { .. }) => {
            assert_eq!(error.user_message(), "Address not found");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }

    Ok(())
}

#[tokio::test]
async fn login_stores_token_for_later_requests() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/user/login", post(login))
        .route("/api/cart/get", get(empty_cart))
        .with_state(stub.clone());

    let api = client(spawn(router).await?, None)?;
    let session = api.session().clone();
    let auth = HttpAuthService::new(api.clone());

    let redirect = auth
        .login(Credentials::new("a@example.com", "hunter2"))
        .await?;

    assert_eq!(redirect, "/dashboard");
    assert_eq!(
        session.token().as_ref().map(BearerToken::expose),
        Some("fresh-token")
    );

    HttpCartsService::new(api, rusty_money::iso::INR).get_cart().await?;

    assert_eq!(
        stub.seen(),
        vec![None, Some("Bearer fresh-token".to_string())]
    );

    Ok(())
}

#[tokio::test]
async fn registration_is_sent_without_a_session() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/user/register", post(register))
        .with_state(stub.clone());

    let auth = HttpAuthService::new(client(spawn(router).await?, None)?);
    let registration = Registration::new("Asha Rao", "asha@example.com", "Str0ng!pw", "Str0ng!pw")?;

    auth.register(&registration).await?;

    assert_eq!(stub.seen(), vec![None]);
    assert_eq!(
        stub.kept(),
        vec![json!({ "name": "Asha Rao", "email": "asha@example.com", "password": "Str0ng!pw" })]
    );

    Ok(())
}

#[tokio::test]
async fn registration_error_flag_carries_backend_message() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/user/register", post(duplicate_user))
        .with_state(stub.clone());

    let auth = HttpAuthService::new(client(spawn(router).await?, None)?);
    let registration = Registration::new("Asha Rao", "asha@example.com", "Str0ng!pw", "Str0ng!pw")?;

    let result = auth.register(&registration).await;

    assert_eq!(
        result.map_err(|error| error.user_message()),
        Err("User already exists".to_string())
    );

    Ok(())
}

#[tokio::test]
async fn verification_code_is_posted_from_link() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/user/verify-email", post(verify_email))
        .with_state(stub.clone());

    let auth = HttpAuthService::new(client(spawn(router).await?, None)?);
    let code = VerificationCode::parse("http://shop.example/verify-email?code=abc123")?;

    let message = auth.verify_email(&code).await?;

    assert_eq!(message, "Email verified");
    assert_eq!(stub.kept(), vec![json!({ "code": "abc123" })]);

    Ok(())
}

#[tokio::test]
async fn category_products_are_filtered_by_id() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/category/search", post(search_category))
        .route("/api/product/get", get(products))
        .with_state(stub.clone());

    let service = HttpProductsService::new(client(spawn(router).await?, None)?, rusty_money::iso::INR);

    let category = service.find_category("Kitchen").await?;
    let listed = service.list_products(Some(category.id)).await?;

    assert_eq!(listed.len(), 2);
    assert_eq!(
        listed.get(1).map(|product| product.price),
        Some(rusty_money::Money::from_minor(149_950, rusty_money::iso::INR))
    );
    assert_eq!(
        stub.kept(),
        vec![json!({ "name": "Kitchen" }), json!("categoryId=c1")]
    );
    assert_eq!(stub.seen(), vec![None, None]);

    Ok(())
}

#[tokio::test]
async fn unfiltered_listing_sends_no_query() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/product/get", get(products))
        .with_state(stub.clone());

    let service = HttpProductsService::new(client(spawn(router).await?, None)?, rusty_money::iso::INR);

    service.list_products(None).await?;

    assert_eq!(stub.kept(), vec![Value::Null]);

    Ok(())
}

#[tokio::test]
async fn product_reviews_are_read_from_top_level() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/reviews/{product}", get(product_reviews))
        .with_state(stub.clone());

    let service = HttpReviewsService::new(client(spawn(router).await?, None)?);

    let reviews = service.product_reviews(&ProductId::new("p1")).await?;

    assert_eq!(reviews.total, 1);
    assert_eq!(reviews.count(Rating::new(4)?), 1);
    assert_eq!(reviews.percent(Rating::new(4)?), 100);
    assert_eq!(stub.kept(), vec![json!("p1")]);

    Ok(())
}

#[tokio::test]
async fn posting_a_review_needs_a_session() -> TestResult {
    let stub = Stub::default();
    let router = Router::new().with_state(stub.clone());

    let service = HttpReviewsService::new(client(spawn(router).await?, None)?);
    let review = storefront_app::domain::reviews::models::NewReview {
        product: ProductId::new("p1"),
        rating: Rating::new(5)?,
        comment: String::new(),
    };

    let result = service.post_review(&review).await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert_eq!(stub.hits.load(Ordering::SeqCst), 0);

    Ok(())
}

#[tokio::test]
async fn notification_is_marked_read_with_patch() -> TestResult {
    let stub = Stub::default();
    let router = Router::new()
        .route("/api/notifications/{id}/read", patch(read_notification))
        .with_state(stub.clone());

    let service = HttpNotificationsService::new(client(spawn(router).await?, Some("abc"))?);

    let notification = service.mark_read(&NotificationId::new("n1")).await?;

    assert!(notification.read);
    assert_eq!(notification.id.as_str(), "n1");
    assert_eq!(stub.seen(), vec![Some("Bearer abc".to_string())]);

    Ok(())
}
