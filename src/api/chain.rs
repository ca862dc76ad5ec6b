use actix_web::{HttpResponse, Responder, get, web};
use log::{info, warn};

use super::models::{AppState, BlockResponse, ChainResponse, ErrorResponse, MessageResponse};

/// Get the full chain.
#[get("/get_chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let resp = ChainResponse {
        chain: ledger.chain(),
        length: ledger.len(),
    };
    HttpResponse::Ok().json(resp)
}

/// Check whether the chain passes its integrity checks.
#[get("/valid")]
pub async fn validate_chain(state: web::Data<AppState>) -> impl Responder {
    let ledger = state.ledger.lock().expect("mutex poisoned");
    let message = if ledger.is_valid() {
        "The Blockchain is valid."
    } else {
        "The Blockchain is not valid."
    };
    HttpResponse::Ok().json(MessageResponse {
        message: message.to_string(),
    })
}

/// Mine a new block from the pending transfer and deposit queues.
///
/// The lock is held across the whole mint, proof-of-work included, so
/// the settlement read and the chain/snapshot write commit atomically
/// with respect to the other handlers.
#[get("/mine_block")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.mint() {
        Ok(block) => {
            info!("MINER - sealed block #{} (hash={})", block.index, block.hash);
            HttpResponse::Ok().json(BlockResponse::new("A block is MINED", block))
        }
        Err(err) => {
            warn!("MINER - mint rejected: {err}");
            HttpResponse::BadRequest().json(ErrorResponse {
                detail: err.to_string(),
            })
        }
    }
}

/// Simulate an attack: overwrite a random non-genesis block's hash with
/// a freshly mined one, leaving the snapshot untouched.
#[get("/hack_block")]
pub async fn hack_block(state: web::Data<AppState>) -> impl Responder {
    let mut ledger = state.ledger.lock().expect("mutex poisoned");
    match ledger.tamper() {
        Some(block) => {
            warn!("ATTACK - block #{} hash overwritten", block.index);
            HttpResponse::Ok().json(BlockResponse::new("A block is HACKED", block))
        }
        None => HttpResponse::BadRequest().json(ErrorResponse {
            detail: "no block beyond genesis to hack".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::api::{self, AppState};
    use crate::api::models::{BlockResponse, MessageResponse};
    use actix_web::{App, test, web};
    use serde_json::json;

    macro_rules! test_app {
        () => {{
            let state = web::Data::new(AppState::with_difficulty("0"));
            test::init_service(App::new().app_data(state).configure(api::init_routes)).await
        }};
    }

    #[actix_web::test]
    async fn fresh_engine_has_only_genesis() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/get_chain").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 1);
        assert_eq!(body["chain"][0]["index"], 1);
        assert_eq!(body["chain"][0]["previous_hash"], "0".repeat(64));
    }

    #[actix_web::test]
    async fn mine_without_funds_is_rejected() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/add_transaction")
            .set_json(json!({"sender": "alice", "receiver": "bob", "amount": 10.0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get().uri("/mine_block").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let req = test::TestRequest::get().uri("/get_chain").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["length"], 1);
    }

    #[actix_web::test]
    async fn deposit_mine_and_validate() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/add_balance")
            .set_json(json!({"receiver": "alice", "amount": 100.0}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let req = test::TestRequest::get().uri("/mine_block").to_request();
        let body: BlockResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.message, "A block is MINED");
        assert_eq!(body.index, 2);
        assert_eq!(body.balances.get("alice"), Some(&100.0));
        assert!(body.transactions.is_empty());

        let req = test::TestRequest::get().uri("/valid").to_request();
        let body: MessageResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.message, "The Blockchain is valid.");
    }

    #[actix_web::test]
    async fn hacked_chain_fails_validation() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/add_balance")
            .set_json(json!({"receiver": "alice", "amount": 100.0}))
            .to_request();
        test::call_service(&app, req).await;
        let req = test::TestRequest::get().uri("/mine_block").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/hack_block").to_request();
        let body: BlockResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.message, "A block is HACKED");

        let req = test::TestRequest::get().uri("/valid").to_request();
        let body: MessageResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.message, "The Blockchain is not valid.");
    }

    #[actix_web::test]
    async fn hack_needs_a_minted_block() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/hack_block").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
