//! End-to-end test against a real listener

use block_simulator::{
    blocks_client::{BlocksClient, HttpBlocksClient},
    delay::NoDelay,
    error::ServiceError,
    models::block::{BlockRequest, Transaction},
    orchestrator::Orchestrator,
    random::ThreadRandom,
    startup,
};
use serde_json::json;
use std::net::TcpListener;
use std::sync::Arc;

/// Start the server on an ephemeral port and return its base URL
fn spawn_app() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Could not bind to port");
    let port = listener.local_addr().unwrap().port();

    let services = startup::Services::new(Arc::new(ThreadRandom), Arc::new(NoDelay));
    let server = startup::run(listener, services, 1).expect("Failed to build server");
    tokio::spawn(server);

    format!("http://127.0.0.1:{}", port)
}

#[actix_web::test]
async fn test_serves_both_endpoints_over_http() {
    let address = spawn_app();
    let client = reqwest::Client::new();

    let quote: serde_json::Value = client
        .get(format!("{}/getCurrentPrice", address))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse quote");
    assert!(quote["gasPrice"].as_u64().unwrap() >= 100);
    assert!(quote["fee"].as_u64().unwrap() >= 10);

    let resp = client
        .post(format!("{}/simulateBlock", address))
        .json(&json!({
            "transactions": [
                {"id": "a", "gasPrice": 5000, "fee": 20},
                {"id": "b", "gasPrice": 4000, "fee": 30}
            ]
        }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(resp.status().as_u16(), 200);

    let block: serde_json::Value = resp.json().await.expect("Failed to parse block");
    assert_eq!(block["totalGas"], 9000);
    assert_eq!(block["totalFees"], 50);
    let seconds = block["processingTimeSeconds"].as_f64().unwrap();
    assert!((1.0..3.0).contains(&seconds));

    let resp = client
        .post(format!("{}/simulateBlock", address))
        .body("not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(resp.status().as_u16(), 400);
    assert_eq!(resp.text().await.unwrap(), "Invalid request payload");
}

#[actix_web::test]
async fn test_mempool_batches_into_running_simulator() {
    let address = spawn_app();
    let client = Arc::new(HttpBlocksClient::new(&address));
    let orchestrator = Orchestrator::new(client, Arc::new(NoDelay));

    for id in ["a", "b", "c"] {
        let tx = orchestrator.accept(id.to_string()).await.expect("Failed to accept");
        assert!(tx.gas_price >= 100);
        assert!(tx.fee >= 10);
    }

    // Three quotes are at most 2997 gas, so one batch takes them all
    assert!(orchestrator.tick().await);

    let stats = orchestrator.stats();
    assert_eq!(stats.submitted_batches, 1);
    assert_eq!(stats.submitted_txs, 3);
    assert_eq!(stats.mempool_size, 0);
    assert_eq!(stats.failed_submits, 0);
}

#[actix_web::test]
async fn test_http_client_surfaces_rejections() {
    let address = spawn_app();
    let client = HttpBlocksClient::new(&address);

    let over_limit = BlockRequest {
        transactions: vec![Transaction {
            id: "big".to_string(),
            gas_price: 20_000,
            fee: 1,
        }],
    };
    let err = client.simulate_block(&over_limit).await.unwrap_err();
    assert!(matches!(err, ServiceError::Upstream(_)));

    // Nothing listens on this port once the temporary listener is dropped
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let unreachable = HttpBlocksClient::new(&format!("http://127.0.0.1:{}", port));
    assert!(matches!(
        unreachable.get_current_price().await,
        Err(ServiceError::Upstream(_))
    ));
}
