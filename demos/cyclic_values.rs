//! Cloning a graph with cycles and shared children.
//!
//! Run with: cargo run --example cyclic_values

use std::error::Error;
use valuekit::{classify, deep_clone, Object, Value};

fn main() -> Result<(), Box<dyn Error>> {
    let parent = Object::new();
    let child = Object::new();
    parent.set("name", Value::from("root"));
    child.set("name", Value::from("leaf"));
    child.set("parent", Value::from(parent.clone()));
    parent.set("first", Value::from(child.clone()));
    parent.set("alias", Value::from(child));
    let parent = Value::from(parent);

    let copy = deep_clone(&parent);

    println!("type: {}", classify(&copy));
    println!("copy is a new object: {}", !copy.same_value(&parent));
    println!(
        "back edge points at the copy: {}",
        copy.get("first").get("parent").same_value(&copy)
    );
    println!(
        "shared child stays shared: {}",
        copy.get("first").same_value(&copy.get("alias"))
    );

    // Cycles cannot be written as JSON.
    match serde_json::to_string(&copy) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("serialize failed: {}", err),
    }

    Ok(())
}
