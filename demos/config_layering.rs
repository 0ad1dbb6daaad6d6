//! Layering configuration with deep_merge over a deep_clone of the defaults.
//!
//! Run with: cargo run --example config_layering

use std::error::Error;
use valuekit::{deep_clone, deep_merge, value};

fn main() -> Result<(), Box<dyn Error>> {
    let defaults = value!({
        "server": { "host": "localhost", "port": 8080, "tls": false },
        "log": { "level": "info" },
        "features": ["search"]
    });
    let file = value!({ "server": { "port": 9090 }, "log": { "level": "debug" } });
    let env = value!({ "server": { "tls": true } });

    // Merge into a copy so the defaults stay reusable.
    let config = deep_merge(&deep_merge(&deep_clone(&defaults), &file), &env);

    println!("Defaults:");
    println!("{}\n", serde_json::to_string_pretty(&defaults)?);

    println!("Effective config:");
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
