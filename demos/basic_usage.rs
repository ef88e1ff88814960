// Basic usage example for lazycfg
//
// Run with: cargo run --example basic_usage

use lazycfg::{ConfigStore, SettingValue};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct Server {
    host: String,
    port: u16,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Start from a plain JSON object
    let mut config = ConfigStore::from_value(json!({
        "app.name": "My App",
        "app.debug": "true",
        "network.port": "8080",
        "server": { "host": "localhost", "port": 8080 },
    }));

    // Derived value, evaluated on every read
    config.set(
        "network.url",
        SettingValue::computed(|cfg| {
            let port = cfg.get_number_or("network.port", 80.0)?;
            Ok(json!(format!("http://localhost:{port}")))
        }),
    )?;

    config.watch("network.port", |key, value| {
        println!("  -> {key} changed to {:?}", value.as_literal());
    });

    println!("=== Reading settings ===");
    println!("Name: {}", config.get("app.name")?);
    println!("Debug: {}", config.get_boolean("app.debug")?);
    println!("Port: {}", config.get_number("network.port")?);
    println!("URL: {}", config.get("network.url")?);
    println!("Missing: {}", config.get_or("app.missing", "n/a")?);

    let server: Server = config.get_as("server")?;
    println!("Server: {}:{}", server.host, server.port);

    println!("\n=== Updating a setting ===");
    config.set("network.port", 9090)?;
    println!("URL: {}", config.get("network.url")?);

    println!("\n=== All settings ===");
    println!("{}", serde_json::to_string_pretty(&config.resolve_all()?)?);

    Ok(())
}
