//! Encode demo - load a catalog and pack a few frames.
//!
//! This example demonstrates:
//! - Registering a checksum family
//! - Loading a catalog from JSON
//! - Encoding frames with an automatic rolling counter
//! - Overriding the counter explicitly
//!
//! ```text
//! cargo run --example encode
//! ```

use std::collections::HashMap;

use canpack::{Catalog, ChecksumRegistry, FramePacker, COUNTER_SIGNAL};

const CATALOG: &str = r#"{
    "name": "demo",
    "checksum": "xor",
    "messages": [{
        "name": "STEERING", "address": 640, "size": 8,
        "signals": [
            {"name": "ANGLE", "start_bit": 0, "size": 16, "factor": 0.1, "offset": -1000.0},
            {"name": "ACTIVE", "start_bit": 32, "size": 1},
            {"name": "COUNTER", "start_bit": 48, "size": 4},
            {"name": "CHECKSUM", "start_bit": 56, "size": 8}
        ]
    }]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = ChecksumRegistry::new();
    registry.register_fn("xor", |_address, _signal, frame| {
        frame.iter().fold(0u8, |acc, b| acc ^ b) as u64
    });

    let packer = FramePacker::new(Catalog::from_json(CATALOG, &registry)?)?;

    let mut values = HashMap::new();
    values.insert("ANGLE".to_string(), 12.5);
    values.insert("ACTIVE".to_string(), 1.0);

    for _ in 0..3 {
        let frame = packer.encode_frame(0x280, &values)?;
        println!("0x{:03X}: {:02X?}", frame.address(), frame.data());
    }

    values.insert(COUNTER_SIGNAL.to_string(), 10.0);
    let frame = packer.encode_frame(0x280, &values)?;
    println!("0x{:03X}: {:02X?} (counter forced)", frame.address(), frame.data());

    Ok(())
}
