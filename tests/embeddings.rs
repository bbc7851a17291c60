//! Integration tests for the embeddings client.
//!
//! These tests run the full request/response cycle against a WireMock
//! server, covering serialization, authentication headers, error
//! mapping, and the blocking facade.

use std::time::Duration;

use embeddings_client::blocking;
use embeddings_client::{EmbeddingsClient, EmbeddingsConfig, EmbeddingsError, EmbeddingsRequest};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds a list response with one entry per vector, indices in order.
fn embeddings_body(vectors: &[Vec<f64>]) -> serde_json::Value {
    let data: Vec<serde_json::Value> = vectors
        .iter()
        .enumerate()
        .map(|(index, embedding)| {
            json!({
                "object": "embedding",
                "embedding": embedding,
                "index": index
            })
        })
        .collect();

    json!({
        "object": "list",
        "data": data,
        "model": "text-embedding-3-small",
        "usage": {
            "prompt_tokens": 4,
            "total_tokens": 4
        }
    })
}

fn error_body(message: &str, error_type: &str, code: &str) -> serde_json::Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": null,
            "code": code
        }
    })
}

fn client_for(server: &MockServer) -> EmbeddingsClient {
    EmbeddingsClient::builder()
        .api_key("test-api-key")
        .base_url(server.uri())
        .build()
        .expect("Failed to build client")
}

#[tokio::test]
async fn test_embed_returns_vector() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_partial_json(json!({
            "model": "text-embedding-3-small",
            "input": "Hello, world!"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(&[vec![0.1, 0.2, 0.3]])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let embedding = client.embed("Hello, world!").await.expect("embed failed");

    assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn test_embed_batch_preserves_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({
            "input": ["first text", "second text"]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(embeddings_body(&[vec![1.0], vec![2.0]])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let embeddings = client
        .embed_batch(vec!["first text".to_string(), "second text".to_string()])
        .await
        .expect("embed_batch failed");

    assert_eq!(embeddings, vec![vec![1.0], vec![2.0]]);
}

#[tokio::test]
async fn test_embed_batch_sorts_responses_by_index() {
    let server = MockServer::start().await;

    // Entries arrive reversed; the client restores input order by index.
    let body = json!({
        "object": "list",
        "data": [
            {"object": "embedding", "embedding": [2.0], "index": 1},
            {"object": "embedding", "embedding": [1.0], "index": 0}
        ],
        "model": "text-embedding-3-small",
        "usage": {"prompt_tokens": 2, "total_tokens": 2}
    });

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let embeddings = client
        .embed_batch(vec!["a".to_string(), "b".to_string()])
        .await
        .expect("embed_batch failed");

    assert_eq!(embeddings, vec![vec![1.0], vec![2.0]]);
}

#[tokio::test]
async fn test_embed_matches_batch_of_one() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(embeddings_body(&[vec![0.5, -0.5]])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let single = client.embed("same text").await.expect("embed failed");
    let batch = client
        .embed_batch(vec!["same text".to_string()])
        .await
        .expect("embed_batch failed");

    assert_eq!(batch.len(), 1);
    assert_eq!(single, batch[0]);
}

#[tokio::test]
async fn test_unauthorized_error_then_client_reuse() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_body(
            "Incorrect API key provided",
            "invalid_request_error",
            "invalid_api_key",
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(&[vec![0.7]])))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client.embed("Hello").await.expect_err("expected 401");
    match err {
        EmbeddingsError::Provider {
            status, message, ..
        } => {
            assert_eq!(status, Some(401));
            assert!(message.contains("Incorrect API key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    // The same client works once the provider recovers.
    let embedding = client.embed("Hello").await.expect("retry failed");
    assert_eq!(embedding, vec![0.7]);
}

#[tokio::test]
async fn test_rate_limit_status_carried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(429).set_body_json(error_body(
            "Rate limit reached for requests",
            "rate_limit_error",
            "rate_limit_exceeded",
        )))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.embed("Hello").await.expect_err("expected 429");

    assert_eq!(err.status(), Some(429));
    assert!(err.to_string().contains("Rate limit reached"));
}

#[tokio::test]
async fn test_server_error_with_plain_text_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.embed("Hello").await.expect_err("expected 503");

    assert_eq!(err.status(), Some(503));
    assert!(err.to_string().contains("Server error: 503"));
}

#[tokio::test]
async fn test_embedding_count_mismatch_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(&[vec![1.0]])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .embed_batch(vec!["a".to_string(), "b".to_string()])
        .await
        .expect_err("expected count mismatch");

    assert!(err.is_provider());
    assert!(err.to_string().contains("Expected 2 embeddings, got 1"));
}

#[tokio::test]
async fn test_timeout_maps_to_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(embeddings_body(&[vec![1.0]]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = EmbeddingsClient::builder()
        .api_key("test-api-key")
        .base_url(server.uri())
        .timeout(Duration::from_millis(200))
        .build()
        .expect("Failed to build client");

    let err = client.embed("Hello").await.expect_err("expected timeout");

    assert!(err.is_provider());
    assert_eq!(err.status(), None);
    assert!(err.to_string().contains("timed out"));
}

#[tokio::test]
async fn test_custom_model_sent_in_request_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({"model": "text-embedding-3-large"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(&[vec![0.9]])))
        .mount(&server)
        .await;

    let client = EmbeddingsClient::builder()
        .api_key("test-api-key")
        .base_url(server.uri())
        .model("text-embedding-3-large")
        .build()
        .expect("Failed to build client");

    let embedding = client.embed("Hello").await.expect("embed failed");
    assert_eq!(embedding, vec![0.9]);
}

#[tokio::test]
async fn test_create_sends_dimensions_and_surfaces_usage() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(body_partial_json(json!({"dimensions": 256})))
        .respond_with(ResponseTemplate::new(200).set_body_json(embeddings_body(&[vec![0.1; 4]])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let request =
        EmbeddingsRequest::new("text-embedding-3-small", "Hello, world!").with_dimensions(256);
    let response = client.create(request).await.expect("create failed");

    assert_eq!(response.usage.prompt_tokens, 4);
    assert_eq!(response.usage.total_tokens, 4);
    assert_eq!(response.data.len(), 1);
}

#[test]
fn test_missing_api_key_fails_before_any_request() {
    let saved = std::env::var("OPENAI_API_KEY").ok();
    std::env::remove_var("OPENAI_API_KEY");

    // No server is running; construction must fail on its own.
    let err = EmbeddingsClient::from_env().expect_err("expected configuration error");
    assert!(err.is_configuration());
    assert!(err.to_string().contains("OPENAI_API_KEY"));

    if let Some(value) = saved {
        std::env::set_var("OPENAI_API_KEY", value);
    }
}

/// The blocking facade and the async client produce identical vectors
/// for the same canned response.
#[test]
fn test_blocking_and_async_return_identical_vectors() {
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("Failed to build server runtime");

    let server = rt.block_on(async {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(embeddings_body(&[vec![0.5, -0.5, 0.25]])),
            )
            .mount(&server)
            .await;

        server
    });

    let config = EmbeddingsConfig::builder()
        .api_key("test-api-key")
        .base_url(server.uri())
        .build()
        .expect("Failed to build config");

    let async_client = EmbeddingsClient::new(config.clone()).expect("Failed to build client");
    let from_async = rt
        .block_on(async_client.embed("Hello, world!"))
        .expect("async embed failed");

    let blocking_client =
        blocking::EmbeddingsClient::new(config).expect("Failed to build blocking client");
    let from_blocking = blocking_client
        .embed("Hello, world!")
        .expect("blocking embed failed");

    assert_eq!(from_async, from_blocking);
    assert_eq!(from_async, vec![0.5, -0.5, 0.25]);
}
