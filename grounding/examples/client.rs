use anyhow::Result;
use grounding_service::{GroundedResponse, Source};
use reqwest::Client;
use serde_json::json;

fn print_sources(sources: &[Source]) {
    // Sources with neither a web nor a place entry are not renderable.
    let renderable = sources.iter().filter_map(|s| s.link().map(|link| (s, link)));
    for (index, (source, link)) in renderable.enumerate() {
        println!("  [{}] {} <{}>", index + 1, link.title, link.uri);
        for snippet in source.review_snippets() {
            println!("      \"{}\" ({})", snippet.text, snippet.uri);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let client = Client::new();
    let base_url = std::env::var("API_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());

    println!("Health Check:");
    let health: serde_json::Value = client
        .get(format!("{}/health", base_url))
        .send()
        .await?
        .json()
        .await?;
    println!("{}", serde_json::to_string_pretty(&health)?);

    println!("\nGeneric task:");
    let task: serde_json::Value = client
        .post(format!("{}/task", base_url))
        .json(&json!({
            "prompt": "Rust is a systems programming language focused on safety and speed.",
            "task": "keywords",
            "model": "fast"
        }))
        .send()
        .await?
        .json()
        .await?;
    println!("{}", task["text"].as_str().unwrap_or_default());

    println!("\nSearch-grounded query:");
    let search: GroundedResponse = client
        .post(format!("{}/search", base_url))
        .json(&json!({ "query": "Who won the most recent Formula 1 race?" }))
        .send()
        .await?
        .json()
        .await?;
    println!("{}", search.text);
    print_sources(&search.sources);

    println!("\nMaps-grounded query:");
    let maps: GroundedResponse = client
        .post(format!("{}/maps", base_url))
        .json(&json!({
            "query": "Good coffee shops nearby?",
            "location": { "latitude": 37.7749, "longitude": -122.4194 }
        }))
        .send()
        .await?
        .json()
        .await?;
    println!("{}", maps.text);
    print_sources(&maps.sources);

    Ok(())
}
