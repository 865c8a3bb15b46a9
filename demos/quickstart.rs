/// Quickstart example: minimal Pardot API flow.
///
/// Demonstrates: build a client from the environment, read a prospect by
/// email, query campaigns and look up dynamic content through its
/// snake_case alias.
use pardot_sdk::PardotClient;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let email = std::env::var("PARDOT_EMAIL")?;
    let password = std::env::var("PARDOT_PASSWORD")?;
    let user_key = std::env::var("PARDOT_USER_KEY")?;
    let prospect_email = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "someone@example.com".to_string());

    let mut client = PardotClient::new(&email, &password, &user_key).with_retries(3);

    // 1. Log in up front (otherwise the first call does it)
    println!("Logging in as {email}...");
    client.login().await?;

    // 2. Read a prospect; the string argument resolves to the `email` identifier
    let mut prospects = client.resource("prospect")?;
    match prospects.call("read", &[json!(prospect_email)], &[]).await {
        Ok(content) => println!("Prospect: {}", content["prospect"]),
        Err(e) => println!("Prospect lookup failed: {e}"),
    }

    // 3. Query campaigns with extra payload fields
    let campaigns = client
        .invoke("campaign", "query", &[], &[("limit", "5"), ("sort_by", "id")])
        .await?;
    println!(
        "Campaigns: {} total",
        campaigns["result"]["total_results"]
    );

    // 4. snake_case alias for dynamicContent
    let content = client.invoke("dynamic_content", "query", &[], &[]).await?;
    println!("Dynamic content: {}", content["result"]["total_results"]);

    Ok(())
}
