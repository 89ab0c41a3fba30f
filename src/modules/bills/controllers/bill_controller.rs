use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::modules::artifacts::models::RequestedAmount;
use crate::modules::bills::models::BillInputs;
use crate::modules::bills::services::BillService;
use crate::modules::payments::models::PaymentRecord;

/// Query parameters for recompute
#[derive(Debug, Default, Deserialize)]
pub struct RecomputeQuery {
    /// Skip validation and artifact generation
    #[serde(default)]
    pub preview: bool,
}

/// Body for starting an empty draft
#[derive(Debug, Default, Deserialize)]
pub struct NewDraftRequest {
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_contact: String,
}

/// Recompute a bill without storing it
/// POST /bills/recompute
pub async fn recompute_bill(
    service: web::Data<Arc<BillService>>,
    query: web::Query<RecomputeQuery>,
    request: web::Json<BillInputs>,
) -> Result<HttpResponse, AppError> {
    let inputs = request.into_inner();
    let bill = if query.preview {
        service.preview(&inputs)?
    } else {
        service.recompute(inputs).await?
    };

    Ok(HttpResponse::Ok().json(bill))
}

/// Create a bill
/// POST /bills
pub async fn create_bill(
    service: web::Data<Arc<BillService>>,
    request: web::Json<BillInputs>,
) -> Result<HttpResponse, AppError> {
    let mut inputs = request.into_inner();
    inputs.internal_id = None;

    let bill = service.save(inputs).await?;
    Ok(HttpResponse::Created().json(bill))
}

/// GET /bills
pub async fn list_bills(service: web::Data<Arc<BillService>>) -> Result<HttpResponse, AppError> {
    let bills = service.list().await?;
    Ok(HttpResponse::Ok().json(bills))
}

/// GET /bills/{id}
pub async fn get_bill(
    service: web::Data<Arc<BillService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bill = service.get(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(bill))
}

/// Replace the inputs of a stored bill
/// PUT /bills/{id}
pub async fn update_bill(
    service: web::Data<Arc<BillService>>,
    path: web::Path<String>,
    request: web::Json<BillInputs>,
) -> Result<HttpResponse, AppError> {
    let bill = service
        .update(&path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(bill))
}

/// POST /bills/{id}/payments
pub async fn record_payment(
    service: web::Data<Arc<BillService>>,
    path: web::Path<String>,
    request: web::Json<PaymentRecord>,
) -> Result<HttpResponse, AppError> {
    let bill = service
        .record_payment(&path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(bill))
}

/// DELETE /bills/{id}/payments/{payment_id}
pub async fn remove_payment(
    service: web::Data<Arc<BillService>>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
    let (bill_id, payment_id) = path.into_inner();
    let bill = service.remove_payment(&bill_id, &payment_id).await?;
    Ok(HttpResponse::Ok().json(bill))
}

/// Pin the requested amount or let it follow the balance
/// PUT /bills/{id}/requested-amount
pub async fn set_requested_amount(
    service: web::Data<Arc<BillService>>,
    path: web::Path<String>,
    request: web::Json<RequestedAmount>,
) -> Result<HttpResponse, AppError> {
    let internal_id = path.into_inner();
    let bill = match request.into_inner() {
        RequestedAmount::Auto => service.follow_balance(&internal_id).await?,
        RequestedAmount::Pinned { amount } => {
            service.pin_requested_amount(&internal_id, amount).await?
        }
    };
    Ok(HttpResponse::Ok().json(bill))
}

/// POST /bills/{id}/artifact
pub async fn regenerate_artifact(
    service: web::Data<Arc<BillService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bill = service.regenerate_artifact(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(bill))
}

/// Start an empty draft with a fresh bill number
/// POST /bills/drafts
pub async fn new_draft(
    service: web::Data<Arc<BillService>>,
    request: Option<web::Json<NewDraftRequest>>,
) -> Result<HttpResponse, AppError> {
    let request = request.map(web::Json::into_inner).unwrap_or_default();
    let draft = service
        .new_draft(request.customer_name, request.customer_contact)
        .await;
    Ok(HttpResponse::Created().json(draft))
}

/// POST /bills/drafts/from-order/{order_id}
pub async fn draft_from_order(
    service: web::Data<Arc<BillService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let draft = service.draft_from_order(&path.into_inner()).await?;
    Ok(HttpResponse::Created().json(draft))
}

/// Configure bill routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bills")
            .route("", web::post().to(create_bill))
            .route("", web::get().to(list_bills))
            .route("/recompute", web::post().to(recompute_bill))
            .route("/drafts", web::post().to(new_draft))
            .route("/drafts/from-order/{order_id}", web::post().to(draft_from_order))
            .route("/{id}", web::get().to(get_bill))
            .route("/{id}", web::put().to(update_bill))
            .route("/{id}/payments", web::post().to(record_payment))
            .route(
                "/{id}/payments/{payment_id}",
                web::delete().to(remove_payment),
            )
            .route("/{id}/requested-amount", web::put().to(set_requested_amount))
            .route("/{id}/artifact", web::post().to(regenerate_artifact)),
    );
}
