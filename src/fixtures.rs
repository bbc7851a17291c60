//! Canned response bodies for unit tests.

use serde_json::{json, Value};

/// Sample successful response: one 1536-dimension embedding.
pub fn embeddings_response() -> Value {
    json!({
        "object": "list",
        "data": [{
            "object": "embedding",
            "embedding": vec![0.0023064255; 1536],
            "index": 0
        }],
        "model": "text-embedding-3-small",
        "usage": {
            "prompt_tokens": 8,
            "total_tokens": 8
        }
    })
}

/// Sample successful response with two inputs.
pub fn embeddings_response_multiple() -> Value {
    json!({
        "object": "list",
        "data": [
            {
                "object": "embedding",
                "embedding": vec![0.0023064255; 1536],
                "index": 0
            },
            {
                "object": "embedding",
                "embedding": vec![0.0019876543; 1536],
                "index": 1
            }
        ],
        "model": "text-embedding-3-small",
        "usage": {
            "prompt_tokens": 16,
            "total_tokens": 16
        }
    })
}

/// Response carrying exactly the given vector for a single input.
pub fn single_embedding(values: Vec<f32>) -> Value {
    batch_embeddings(vec![values])
}

/// Response carrying the given vectors, indexed in order.
pub fn batch_embeddings(vectors: Vec<Vec<f32>>) -> Value {
    let data: Vec<Value> = vectors
        .into_iter()
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

/// Provider-shaped error body.
pub fn error_response(message: &str, error_type: &str, code: Option<&str>) -> Value {
    json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": null,
            "code": code
        }
    })
}
