// HTTP surface tests against an in-process actix app

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use actix_web::{test, web, App};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use helpers::*;
use tailor_billing::core::traits::PersistenceStore;
use tailor_billing::middleware::{json_error_handler, RequestId};
use tailor_billing::modules::bills::repositories::{InMemoryStore, ORDERS};
use tailor_billing::modules::bills::services::BillService;

type AppState = (
    web::Data<Arc<dyn PersistenceStore>>,
    web::Data<Arc<BillService>>,
);

fn app_state(store: Arc<InMemoryStore>) -> AppState {
    let store: Arc<dyn PersistenceStore> = store;
    let service = Arc::new(service_with(store.clone(), CountingEncoder::new()));
    (web::Data::new(store), web::Data::new(service))
}

macro_rules! init_app {
    ($store:expr) => {{
        let (store, service) = app_state($store);
        test::init_service(
            App::new()
                .wrap(RequestId)
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(store)
                .app_data(service)
                .configure(tailor_billing::configure_routes),
        )
        .await
    }};
}

/// Money members are serialized as decimal strings
fn money(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn shirt_bill_body() -> Value {
    json!({
        "customer_name": "Ravi Kumar",
        "customer_contact": "9811122233",
        "items": {
            "layout": "flat",
            "entries": [
                { "description": "Shirt stitching", "quantity": 2, "unit_rate": "500" }
            ]
        },
        "tax_rate_percent": 10
    })
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!(seeded_store().await);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), 200);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/ready").to_request()).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_create_and_fetch_bill() {
    let app = init_app!(seeded_store().await);

    let req = test::TestRequest::post()
        .uri("/bills")
        .set_json(shirt_bill_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    assert!(resp.headers().contains_key("x-request-id"));

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["bill_id"], "BILL-0001");
    assert_eq!(money(&created["total_amount"]), dec!(1100));
    assert_eq!(created["status"], "unpaid");

    let id = created["internal_id"].as_str().unwrap();
    let req = test::TestRequest::get().uri(&format!("/bills/{}", id)).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["bill_id"], "BILL-0001");

    let req = test::TestRequest::get().uri("/bills").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_recompute_preview_and_validation() {
    let app = init_app!(seeded_store().await);

    let mut incomplete = shirt_bill_body();
    incomplete["customer_name"] = json!("");

    let req = test::TestRequest::post()
        .uri("/bills/recompute?preview=true")
        .set_json(&incomplete)
        .to_request();
    let preview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(money(&preview["subtotal"]), dec!(1000));
    assert!(preview.get("payment_artifact").is_none());

    let req = test::TestRequest::post()
        .uri("/bills/recompute")
        .set_json(&incomplete)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["details"]["kind"], "missing_field");
    assert_eq!(body["error"]["details"]["field"], "customer_name");
}

#[actix_web::test]
async fn test_payment_lifecycle() {
    let app = init_app!(seeded_store().await);

    let req = test::TestRequest::post()
        .uri("/bills")
        .set_json(shirt_bill_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["internal_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/bills/{}/payments", id))
        .set_json(json!({
            "id": "pay-1",
            "amount": "1100",
            "method": { "type": "split", "cash_portion": "600", "online_portion": "500" }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let paid: Value = test::read_body_json(resp).await;
    assert_eq!(paid["status"], "paid");
    assert_eq!(money(&paid["balance"]), Decimal::ZERO);

    let req = test::TestRequest::delete()
        .uri(&format!("/bills/{}/payments/pay-1", id))
        .to_request();
    let reopened: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(reopened["status"], "unpaid");

    let req = test::TestRequest::put()
        .uri(&format!("/bills/{}/requested-amount", id))
        .set_json(json!({ "mode": "pinned", "amount": "250" }))
        .to_request();
    let pinned: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(money(&pinned["requested_payment_amount"]), dec!(250));

    let req = test::TestRequest::post()
        .uri(&format!("/bills/{}/artifact", id))
        .to_request();
    let regenerated: Value = test::call_and_read_body_json(&app, req).await;
    let link = regenerated["payment_artifact"]["deep_link"].as_str().unwrap();
    assert!(link.contains("&am=250.00&"));
}

#[actix_web::test]
async fn test_inconsistent_split_rejected() {
    let app = init_app!(seeded_store().await);

    let req = test::TestRequest::post()
        .uri("/bills")
        .set_json(shirt_bill_body())
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["internal_id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri(&format!("/bills/{}/payments", id))
        .set_json(json!({
            "amount": 500,
            "method": { "type": "split", "cash_portion": 100, "online_portion": 100 }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["details"]["kind"], "inconsistent_split_payment");
}

#[actix_web::test]
async fn test_drafts() {
    let store = seeded_store().await;
    store.put(ORDERS, "ord-17", order_document()).await;
    let app = init_app!(store);

    let req = test::TestRequest::post()
        .uri("/bills/drafts")
        .set_json(json!({ "customer_name": "Walk-in" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let draft: Value = test::read_body_json(resp).await;
    assert_eq!(draft["bill_id"], "BILL-0001");
    assert_eq!(draft["payee"]["payee_id"], "stitchwell@upi");

    let req = test::TestRequest::post()
        .uri("/bills/drafts/from-order/ord-17")
        .to_request();
    let from_order: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(from_order["customer_name"], "Meera Iyer");
    assert_eq!(from_order["items"]["entries"].as_array().unwrap().len(), 3);
}

#[actix_web::test]
async fn test_errors_use_standard_body() {
    let app = init_app!(seeded_store().await);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/bills/does-not-exist").to_request(),
    )
    .await;
    assert_eq!(resp.status(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 404);

    let req = test::TestRequest::post()
        .uri("/bills")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ \"customer_name\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 400);
}
