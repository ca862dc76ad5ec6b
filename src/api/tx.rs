use actix_web::{HttpResponse, Responder, post, web};
use log::{debug, warn};

use super::models::{AppState, DepositRequest, ErrorResponse, MessageResponse, TransferRequest};

/// Queue a transfer for inclusion in the next mined block.
#[post("/add_transaction")]
pub async fn add_transaction(
    state: web::Data<AppState>,
    body: web::Json<TransferRequest>,
) -> impl Responder {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.enqueue_transfer(&body.sender, &body.receiver, body.amount) {
        Ok(index) => {
            debug!(
                "TX - queued {} -> {} ({}) for block {index}",
                body.sender, body.receiver, body.amount
            );
            HttpResponse::Ok().json(MessageResponse {
                message: format!("Transaction added to block {index}"),
            })
        }
        Err(err) => {
            warn!("TX - rejected: {err}");
            HttpResponse::BadRequest().json(ErrorResponse {
                detail: err.to_string(),
            })
        }
    }
}

/// Queue a deposit for inclusion in the next mined block. A second
/// deposit for the same receiver before the next mint replaces the
/// first.
#[post("/add_balance")]
pub async fn add_balance(
    state: web::Data<AppState>,
    body: web::Json<DepositRequest>,
) -> impl Responder {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.enqueue_deposit(&body.receiver, body.amount) {
        Ok(index) => HttpResponse::Ok().json(MessageResponse {
            message: format!("Balance added to block {index}"),
        }),
        Err(err) => {
            warn!("DEPOSIT - rejected: {err}");
            HttpResponse::BadRequest().json(ErrorResponse {
                detail: err.to_string(),
            })
        }
    }
}
