//! End-to-end cart tests against a running storefront.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use artisan_market_core::{Catalog, Money, ProductSnapshot};
use artisan_market_integration_tests::TestServer;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

fn catalog() -> Catalog {
    Catalog::new(vec![
        ProductSnapshot::new("a", "Clay Lamp", Money::parse("10").unwrap()),
        ProductSnapshot::new("b", "Brass Bell", Money::parse("5").unwrap()),
        ProductSnapshot::new("c", "Copper Kettle", Money::parse("60").unwrap()),
    ])
    .unwrap()
}

async fn post(client: &Client, server: &TestServer, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client.post(server.url(path)).json(&body).send().await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

async fn get(client: &Client, server: &TestServer, path: &str) -> (StatusCode, Value) {
    let response = client.get(server.url(path)).send().await.unwrap();
    let status = response.status();
    (status, response.json().await.unwrap())
}

#[tokio::test]
async fn test_pricing_scenarios() {
    let server = TestServer::spawn(catalog()).await.unwrap();
    let client = TestServer::session_client().unwrap();

    let (status, body) = post(&client, &server, "/cart/add", json!({ "product_id": "a" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"]["subtotal"]["amount"], "10.00");
    assert_eq!(body["cart"]["tax"]["amount"], "0.80");
    assert_eq!(body["cart"]["shipping"]["amount"], "9.99");
    assert_eq!(body["cart"]["total"]["amount"], "20.79");

    let (_, body) = post(
        &client,
        &server,
        "/cart/update",
        json!({ "product_id": "a", "quantity": 2 }),
    )
    .await;
    assert_eq!(body["outcome"], "updated");
    assert_eq!(body["cart"]["total"]["amount"], "31.59");

    let (_, body) = post(
        &client,
        &server,
        "/cart/update",
        json!({ "product_id": "a", "quantity": 6 }),
    )
    .await;
    assert_eq!(body["cart"]["subtotal"]["amount"], "60.00");
    assert_eq!(body["cart"]["tax"]["amount"], "4.80");
    assert_eq!(body["cart"]["shipping"]["amount"], "0.00");
    assert_eq!(body["cart"]["total"]["amount"], "64.80");
}

#[tokio::test]
async fn test_sessions_do_not_share_carts() {
    let server = TestServer::spawn(catalog()).await.unwrap();
    let alice = TestServer::session_client().unwrap();
    let bob = TestServer::session_client().unwrap();

    post(&alice, &server, "/cart/add", json!({ "product_id": "a" })).await;
    post(&alice, &server, "/cart/add", json!({ "product_id": "a" })).await;
    post(&bob, &server, "/cart/add", json!({ "product_id": "b" })).await;

    let (_, alice_cart) = get(&alice, &server, "/cart").await;
    let (_, bob_cart) = get(&bob, &server, "/cart").await;

    assert_ne!(alice_cart["id"], bob_cart["id"]);
    assert_eq!(alice_cart["total_items"], 2);
    assert_eq!(alice_cart["items"][0]["id"], "a");
    assert_eq!(bob_cart["total_items"], 1);
    assert_eq!(bob_cart["items"][0]["id"], "b");
}

#[tokio::test]
async fn test_remove_restores_empty_cart() {
    let server = TestServer::spawn(catalog()).await.unwrap();
    let client = TestServer::session_client().unwrap();

    let (_, mut empty) = get(&client, &server, "/cart").await;
    assert!(empty.get("id").is_none());

    let (_, body) = post(&client, &server, "/cart/add", json!({ "product_id": "b" })).await;
    let id = body["cart"]["id"].clone();
    assert!(id.is_string());
    empty["id"] = id;

    let (_, body) = post(&client, &server, "/cart/remove", json!({ "product_id": "b" })).await;
    assert_eq!(body["outcome"], "removed");
    assert_eq!(body["cart"], empty);

    let (_, body) = post(&client, &server, "/cart/remove", json!({ "product_id": "b" })).await;
    assert_eq!(body["outcome"], "not_found");
    assert_eq!(body["cart"], empty);
}

#[tokio::test]
async fn test_browsing_without_cookies_keeps_no_cart() {
    let server = TestServer::spawn(catalog()).await.unwrap();
    let client = Client::new();

    for _ in 0..10 {
        let response = client.get(server.url("/cart/count")).send().await.unwrap();
        assert!(response.headers().get(reqwest::header::SET_COOKIE).is_none());
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["total_items"], 0);
    }
}

#[tokio::test]
async fn test_zero_quantity_removes_line() {
    let server = TestServer::spawn(catalog()).await.unwrap();
    let client = TestServer::session_client().unwrap();

    post(&client, &server, "/cart/add", json!({ "product_id": "a" })).await;
    post(&client, &server, "/cart/add", json!({ "product_id": "b" })).await;

    let (_, body) = post(
        &client,
        &server,
        "/cart/update",
        json!({ "product_id": "a", "quantity": 0 }),
    )
    .await;
    assert_eq!(body["outcome"], "removed");
    assert_eq!(body["cart"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["cart"]["total_items"], 1);

    let (_, body) = get(&client, &server, "/cart/count").await;
    assert_eq!(body["total_items"], 1);
}

#[tokio::test]
async fn test_checkout() {
    let server = TestServer::spawn(catalog()).await.unwrap();
    let client = TestServer::session_client().unwrap();

    let (status, body) = get(&client, &server, "/checkout").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    post(&client, &server, "/cart/add", json!({ "product_id": "c" })).await;
    let (status, body) = get(&client, &server, "/checkout").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lines"][0]["name"], "Copper Kettle");
    assert_eq!(body["subtotal"], "$60.00");
    assert_eq!(body["shipping"], "$0.00");
    assert_eq!(body["total"], "$64.80");
    assert_eq!(body["free_shipping"], true);
}

#[tokio::test]
async fn test_unknown_product_is_rejected() {
    let server = TestServer::spawn(catalog()).await.unwrap();
    let client = TestServer::session_client().unwrap();

    let (status, body) = post(&client, &server, "/cart/add", json!({ "product_id": "zzz" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("zzz"));

    let (_, cart) = get(&client, &server, "/cart").await;
    assert_eq!(cart["total_items"], 0);
}
