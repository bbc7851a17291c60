//! Example: Embedding text
//!
//! This example demonstrates how to convert a single string and a small
//! batch of strings into embedding vectors.
//!
//! ## Usage
//!
//! Set your API key (a `.env` file works too):
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! ```
//!
//! Run the example:
//! ```bash
//! cargo run --example embed_text
//! ```

use embeddings_client::{known_dimensions, EmbeddingsClient, EmbeddingsRequest};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Reads OPENAI_API_KEY (and optional overrides) from the environment
    let client = EmbeddingsClient::from_env()?;
    println!("Using model: {}", client.model());
    if let Some(dims) = known_dimensions(client.model()) {
        println!("Expected dimensions: {dims}");
    }

    // Embed a single string
    let text = "Hello, world!";
    let embedding = client.embed(text).await?;
    println!("\n\"{text}\" -> {} dimensions", embedding.len());
    println!("First components: {:?}", &embedding[..embedding.len().min(5)]);

    // Embed a batch; results come back in input order
    let texts = vec!["Hello, world!".to_string(), "Goodbye, world!".to_string()];
    let embeddings = client.embed_batch(texts.clone()).await?;
    for (text, embedding) in texts.iter().zip(&embeddings) {
        println!("\"{text}\" -> {} dimensions", embedding.len());
    }

    // The raw request surface exposes token usage
    let request = EmbeddingsRequest::new(client.model(), text);
    let response = client.create(request).await?;
    println!("\n---");
    println!("Tokens used:");
    println!("  Prompt: {}", response.usage.prompt_tokens);
    println!("  Total: {}", response.usage.total_tokens);

    Ok(())
}
