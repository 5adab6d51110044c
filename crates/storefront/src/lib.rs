//! Artisan Market Storefront library.
//!
//! This crate provides the storefront functionality as a library,
//! allowing it to be tested and reused.
//!
//! # Architecture
//!
//! - Axum web framework serving a JSON API
//! - Product catalog loaded once at startup
//! - One in-memory cart per browser session, owned by [`state::AppState`]
//!   and resolved per request through [`carts::SessionCart`]

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::{Router, extract::Request, middleware::from_fn};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the storefront router with its full middleware stack.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config(), state.sessions().clone());

    Router::new()
        .merge(routes::routes())
        .layer(session_layer)
        .layer(from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use artisan_market_core::{Catalog, Money, ProductSnapshot};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;
    use crate::error::AppError;

    fn test_state() -> AppState {
        let catalog = Catalog::new(vec![
            ProductSnapshot::new("a", "Clay Lamp", Money::parse("10").unwrap()),
            ProductSnapshot::new("b", "Brass Bell", Money::parse("5").unwrap()),
        ])
        .unwrap();
        AppState::new(StorefrontConfig::local(), catalog)
    }

    fn test_app() -> Router {
        app(test_state())
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn session_cookie(response: &Response) -> String {
        let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    fn post(uri: &str, cookie: Option<&str>, body: &Value) -> Request<Body> {
        let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::get(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app().oneshot(get("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_product_listing_and_detail() {
        let app = test_app();

        let response = app.clone().oneshot(get("/products", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["count"], 2);
        assert_eq!(body["products"][0]["display_price"], "$10.00");

        let response = app.clone().oneshot(get("/products/b", None)).await.unwrap();
        assert_eq!(body_json(response).await["name"], "Brass Bell");

        let response = app.oneshot(get("/products/zzz", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cart_flow_within_one_session() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post("/cart/add", None, &json!({ "product_id": "a" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);
        let body = body_json(response).await;
        assert_eq!(body["outcome"], "added");
        assert_eq!(body["cart"]["total"]["amount"], "20.79");

        let response = app
            .clone()
            .oneshot(post("/cart/add", Some(&cookie), &json!({ "product_id": "a" })))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["outcome"], "incremented");
        assert_eq!(body["quantity"], 2);
        assert_eq!(body["cart"]["total"]["amount"], "31.59");

        let response = app
            .clone()
            .oneshot(post(
                "/cart/update",
                Some(&cookie),
                &json!({ "product_id": "a", "quantity": 6 }),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["outcome"], "updated");
        assert_eq!(body["cart"]["shipping"]["amount"], "0.00");
        assert_eq!(body["cart"]["total"]["amount"], "64.80");

        let response = app
            .clone()
            .oneshot(post("/cart/remove", Some(&cookie), &json!({ "product_id": "b" })))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["outcome"], "not_found");

        let response = app
            .clone()
            .oneshot(get("/cart/count", Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["total_items"], 6);

        let response = app
            .clone()
            .oneshot(post("/cart/clear", Some(&cookie), &json!({})))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["cleared"], 1);
        assert_eq!(body["cart"]["items"], json!([]));
        assert_eq!(body["cart"]["total"]["amount"], "0.00");
    }

    #[tokio::test]
    async fn test_add_unknown_product_is_404() {
        let response = test_app()
            .oneshot(post("/cart/add", None, &json!({ "product_id": "nope" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_checkout_requires_items() {
        let app = test_app();

        let response = app.clone().oneshot(get("/checkout", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(post("/cart/add", None, &json!({ "product_id": "b" })))
            .await
            .unwrap();
        let cookie = session_cookie(&response);

        let response = app.oneshot(get("/checkout", Some(&cookie))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["lines"][0]["line_total"], "$5.00");
        assert_eq!(body["tax"], "$0.40");
        assert_eq!(body["shipping"], "$9.99");
        assert_eq!(body["total"], "$15.39");
        assert_eq!(body["free_shipping"], false);
    }

    #[tokio::test]
    async fn test_reads_do_not_create_carts_or_sessions() {
        let state = test_state();
        let app = app(state.clone());

        for uri in ["/cart", "/cart/count", "/checkout"] {
            for _ in 0..20 {
                let response = app.clone().oneshot(get(uri, None)).await.unwrap();
                assert!(response.headers().get(header::SET_COOKIE).is_none());
            }
        }

        let response = app.clone().oneshot(get("/cart", None)).await.unwrap();
        let body = body_json(response).await;
        assert!(body.get("id").is_none());
        assert_eq!(body["total_items"], 0);
        assert_eq!(body["total"]["amount"], "0.00");

        state.carts().sync().await;
        state.sessions().sync().await;
        assert!(state.carts().is_empty());
        assert!(state.sessions().is_empty());

        let response = app
            .oneshot(post("/cart/add", None, &json!({ "product_id": "a" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        state.carts().sync().await;
        state.sessions().sync().await;
        assert_eq!(state.carts().len(), 1);
        assert_eq!(state.sessions().len(), 1);
    }

    #[tokio::test]
    async fn test_reads_see_existing_cart() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post("/cart/add", None, &json!({ "product_id": "b" })))
            .await
            .unwrap();
        let cookie = session_cookie(&response);
        let id = body_json(response).await["cart"]["id"].clone();

        let response = app.oneshot(get("/cart", Some(&cookie))).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["id"], id);
        assert_eq!(body["total_items"], 1);
    }

    #[tokio::test]
    async fn test_catalog_in_foreign_currency_cannot_fill_carts() {
        let inr = artisan_market_core::CurrencyCode::INR;
        let catalog = Catalog::priced_in(
            vec![ProductSnapshot::new("r", "Diya", Money::from_cents(2000, inr))],
            inr,
        )
        .unwrap();
        let app = app(AppState::new(StorefrontConfig::local(), catalog));

        let response = app
            .oneshot(post("/cart/add", None, &json!({ "product_id": "r" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
        assert_eq!(body_json(response).await["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_cart_outside_session_scope_fails_loudly() {
        let catalog = Catalog::new(vec![]).unwrap();
        let bare = routes::routes().with_state(AppState::new(StorefrontConfig::local(), catalog));

        let response = bare.oneshot(get("/cart", None)).await.unwrap();
        assert_eq!(response.status(), AppError::CartScope.status());
    }
}
