//! In-process load mix: read-heavy traffic with occasional creates, misses and
//! invalid writes, fired from many concurrent virtual users at one router.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use product_catalog::{build_router, AppState};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use tokio::task::JoinSet;
use tower::ServiceExt;

const VIRTUAL_USERS: u64 = 32;
const OPS_PER_USER: u64 = 100;

#[derive(Default)]
struct Counters {
    creates: AtomicU64,
    reads: AtomicU64,
    misses: AtomicU64,
    rejected: AtomicU64,
}

fn random_sku(rng: &mut StdRng) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    (0..10)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

fn random_product(rng: &mut StdRng, id: i64) -> Value {
    json!({
        "product_id": id,
        "sku": random_sku(rng),
        "manufacturer": format!("Manufacturer-{}", rng.gen_range(1..=100)),
        "category_id": rng.gen_range(1..=50),
        "weight": rng.gen_range(0..=10_000),
        "some_other_id": rng.gen_range(1..=1_000),
    })
}

async fn call(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post(id: i64, body: &Value) -> Request<Body> {
    Request::post(format!("/products/{id}/details"))
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(id: i64) -> Request<Body> {
    Request::get(format!("/products/{id}")).body(Body::empty()).unwrap()
}

fn assert_complete(body: &Value, id: i64) {
    assert_eq!(body["product_id"], id);
    let sku = body["sku"].as_str().unwrap();
    assert_eq!(sku.len(), 10);
    assert!(body["manufacturer"].as_str().unwrap().starts_with("Manufacturer-"));
    assert!(body["category_id"].as_i64().unwrap() >= 1);
    assert!(body["weight"].as_i64().unwrap() >= 0);
    assert!(body["some_other_id"].as_i64().unwrap() >= 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn mixed_load_only_yields_expected_statuses() {
    let state = AppState::new();
    let app = build_router(state.clone());
    let max_id = Arc::new(AtomicI64::new(0));
    let counters = Arc::new(Counters::default());

    let mut join_set: JoinSet<()> = JoinSet::new();

    for user in 0..VIRTUAL_USERS {
        let app = app.clone();
        let max_id = Arc::clone(&max_id);
        let counters = Arc::clone(&counters);

        join_set.spawn(async move {
            let mut rng = StdRng::seed_from_u64(user);

            for _ in 0..OPS_PER_USER {
                // weights: create 1, read 5, missing read 1, invalid write 1
                let roll = rng.gen_range(0..8);
                let known = max_id.load(Ordering::SeqCst);

                if roll == 0 || known < 1 {
                    let id = max_id.fetch_add(1, Ordering::SeqCst) + 1;
                    let (status, body) = call(&app, post(id, &random_product(&mut rng, id))).await;
                    assert_eq!(status, StatusCode::NO_CONTENT, "create {id}: {body}");
                    counters.creates.fetch_add(1, Ordering::Relaxed);
                } else if roll <= 5 {
                    let id = rng.gen_range(1..=known);
                    let (status, body) = call(&app, get(id)).await;
                    // an id can be reserved before its write commits
                    match status {
                        StatusCode::OK => assert_complete(&body, id),
                        StatusCode::NOT_FOUND => assert_eq!(body["error"], "NOT_FOUND"),
                        other => panic!("unexpected status {other} for read {id}"),
                    }
                    counters.reads.fetch_add(1, Ordering::Relaxed);
                } else if roll == 6 {
                    let id = rng.gen_range(900_000..=999_999);
                    let (status, _) = call(&app, get(id)).await;
                    assert_eq!(status, StatusCode::NOT_FOUND);
                    counters.misses.fetch_add(1, Ordering::Relaxed);
                } else {
                    let id = rng.gen_range(1..=100);
                    let (status, body) = call(&app, post(id, &json!({ "product_id": id }))).await;
                    assert_eq!(status, StatusCode::BAD_REQUEST);
                    assert_eq!(body["error"], "INVALID_INPUT");
                    counters.rejected.fetch_add(1, Ordering::Relaxed);
                }
            }
        });
    }

    while let Some(res) = join_set.join_next().await {
        res.unwrap();
    }

    let creates = counters.creates.load(Ordering::Relaxed);
    let total = creates
        + counters.reads.load(Ordering::Relaxed)
        + counters.misses.load(Ordering::Relaxed)
        + counters.rejected.load(Ordering::Relaxed);
    assert_eq!(total, VIRTUAL_USERS * OPS_PER_USER);

    // invalid writes never land, so the registry holds exactly the creates
    assert_eq!(state.registry.len().await as u64, creates);
    assert_eq!(max_id.load(Ordering::SeqCst) as u64, creates);
}
