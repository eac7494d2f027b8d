//! Integration tests for canpack.
//!
//! These tests drive the public API end to end: catalog loading, encoding,
//! counters and checksums.

use std::collections::HashMap;
use std::sync::Arc;

use canpack::codec::MsgPackCodec;
use canpack::packer::mask;
use canpack::{
    ByteOrder, Catalog, ChecksumRegistry, FramePacker, Message, PackerError, Signal,
    SignalValues, CHECKSUM_SIGNAL, COUNTER_SIGNAL,
};

fn values(pairs: &[(&str, f64)]) -> SignalValues {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

/// Read a field back out of a frame, mirroring the writer's traversal.
fn read_field(frame: &[u8], signal: &Signal) -> u64 {
    let mut index = (signal.start_bit / 8) as i64;
    let mut shift = (signal.start_bit % 8) as u32;
    let mut remaining = signal.size as u32;
    let mut consumed = 0u32;
    let mut out = 0u64;
    while remaining > 0 && index >= 0 && (index as usize) < frame.len() {
        let size = remaining.min(8 - shift);
        let chunk = ((frame[index as usize] >> shift) as u64) & ((1u64 << size) - 1);
        out |= chunk << consumed;
        consumed += size;
        remaining -= size;
        shift = 0;
        index += match signal.byte_order {
            ByteOrder::LittleEndian => 1,
            ByteOrder::BigEndian => -1,
        };
    }
    out
}

fn xor_registry() -> ChecksumRegistry {
    let mut registry = ChecksumRegistry::new();
    registry.register_fn("xor", |_, _, frame| {
        frame.iter().fold(0u8, |acc, b| acc ^ b) as u64
    });
    registry
}

const CATALOG_JSON: &str = r#"{
    "name": "vehicle",
    "checksum": "xor",
    "messages": [
        {"name": "WHEEL_SPEED", "address": 512, "size": 1, "signals": [
            {"name": "SPEED", "start_bit": 0, "size": 8, "factor": 0.5}
        ]},
        {"name": "STEERING", "address": 640, "size": 8, "signals": [
            {"name": "ANGLE", "start_bit": 0, "size": 16, "factor": 0.1, "offset": -1000.0},
            {"name": "TORQUE", "start_bit": 24, "size": 12, "byte_order": "big_endian", "factor": 0.5},
            {"name": "ACTIVE", "start_bit": 32, "size": 1},
            {"name": "COUNTER", "start_bit": 48, "size": 4},
            {"name": "CHECKSUM", "start_bit": 56, "size": 8}
        ]}
    ]
}"#;

fn vehicle_packer() -> FramePacker {
    FramePacker::new(Catalog::from_json(CATALOG_JSON, &xor_registry()).unwrap()).unwrap()
}

/// The single-signal speed message from the protocol examples.
#[test]
fn test_speed_message_bytes() {
    let packer = vehicle_packer();
    assert_eq!(packer.encode(0x200, &values(&[("SPEED", 10.0)])).unwrap(), vec![0x14]);
    assert_eq!(packer.encode(0x200, &SignalValues::new()).unwrap(), vec![0x00]);
}

/// Decoding a field with the inverse transform lands within one quantum.
#[test]
fn test_round_trip_within_quantization() {
    let packer = vehicle_packer();
    let message = packer.lookup(0x280).unwrap().clone();
    let angle = message.get_signal("ANGLE").unwrap();
    let torque = message.get_signal("TORQUE").unwrap();

    for (a, t) in [(-1000.0, 0.0), (-12.34, 3.5), (0.0, 1.25), (5553.5, 2047.0)] {
        let frame = packer
            .encode(0x280, &values(&[("ANGLE", a), ("TORQUE", t)]))
            .unwrap();

        let decoded_angle = read_field(&frame, angle) as f64 * angle.factor + angle.offset;
        let decoded_torque = read_field(&frame, torque) as f64 * torque.factor + torque.offset;

        assert!((decoded_angle - a).abs() <= angle.factor, "angle {} -> {}", a, decoded_angle);
        assert!((decoded_torque - t).abs() <= torque.factor, "torque {} -> {}", t, decoded_torque);
    }
}

/// Writing one signal never disturbs another.
#[test]
fn test_signals_do_not_bleed() {
    let packer = vehicle_packer();
    let message = packer.lookup(0x280).unwrap().clone();
    let active = message.get_signal("ACTIVE").unwrap();
    let torque = message.get_signal("TORQUE").unwrap();
    let angle = message.get_signal("ANGLE").unwrap();

    let frame = packer
        .encode(
            0x280,
            &values(&[("ACTIVE", 1.0), ("TORQUE", 2047.5), ("ANGLE", 5553.5)]),
        )
        .unwrap();
    assert_eq!(read_field(&frame, active), 1);
    assert_eq!(read_field(&frame, torque), mask(12));
    assert_eq!(read_field(&frame, angle), mask(16));

    let frame = packer
        .encode(0x280, &values(&[("ACTIVE", 0.0), ("TORQUE", 2047.5)]))
        .unwrap();
    assert_eq!(read_field(&frame, active), 0);
    assert_eq!(read_field(&frame, torque), mask(12));
    // ANGLE not supplied: physical 0.0 -> raw 10000
    assert_eq!(read_field(&frame, angle), 10000);
}

#[test]
fn test_counter_sequence_and_wrap() {
    let packer = vehicle_packer();
    let counter = packer.lookup(0x280).unwrap().counter_signal().unwrap().clone();

    let seen: Vec<u64> = (0..40)
        .map(|_| read_field(&packer.encode(0x280, &SignalValues::new()).unwrap(), &counter))
        .collect();
    let expected: Vec<u64> = (0..40).map(|i| i % 16).collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_counter_override_then_resume() {
    let packer = vehicle_packer();
    let counter = packer.lookup(0x280).unwrap().counter_signal().unwrap().clone();

    packer.encode(0x280, &SignalValues::new()).unwrap();
    let frame = packer.encode(0x280, &values(&[(COUNTER_SIGNAL, 12.0)])).unwrap();
    assert_eq!(read_field(&frame, &counter), 12);

    let next: Vec<u64> = (0..5)
        .map(|_| read_field(&packer.encode(0x280, &SignalValues::new()).unwrap(), &counter))
        .collect();
    assert_eq!(next, vec![13, 14, 15, 0, 1]);
}

#[test]
fn test_checksum_matches_algorithm() {
    let packer = vehicle_packer();
    for angle in [-1000.0, -1.0, 0.0, 42.0, 300.7] {
        let frame = packer.encode(0x280, &values(&[("ANGLE", angle)])).unwrap();
        let expected = frame[..7].iter().fold(0u8, |acc, b| acc ^ b);
        assert_eq!(frame[7], expected, "angle {}", angle);
    }
}

#[test]
fn test_checksum_masked_to_width() {
    let mut registry = ChecksumRegistry::new();
    registry.register_fn("wide", |_, _, _| 0xABCD);
    let catalog = Catalog::new("mask").message(
        Message::new("M", 0x10, 1)
            .signal(Signal::new("A", 0, 4))
            .signal(Signal::new(CHECKSUM_SIGNAL, 4, 4).with_checksum(registry.resolve("wide").unwrap())),
    );
    let packer = FramePacker::new(catalog).unwrap();
    let frame = packer.encode(0x10, &values(&[("A", 3.0)])).unwrap();
    assert_eq!(frame, vec![0xD3]);
}

#[test]
fn test_checksum_receives_address_and_signal() {
    let mut registry = ChecksumRegistry::new();
    registry.register_fn("probe", |address, signal, frame| {
        assert_eq!(signal.name, CHECKSUM_SIGNAL);
        assert_eq!(frame.len(), 2);
        // checksum byte is still zero while computing
        assert_eq!(frame[1], 0);
        (address & 0xFF) as u64
    });
    let catalog = Catalog::new("probe").message(
        Message::new("M", 0x1AB, 2)
            .signal(Signal::new("A", 0, 8))
            .signal(Signal::new(CHECKSUM_SIGNAL, 8, 8).with_checksum(registry.resolve("probe").unwrap())),
    );
    let packer = FramePacker::new(catalog).unwrap();
    assert_eq!(packer.encode(0x1AB, &values(&[("A", 1.0)])).unwrap(), vec![0x01, 0xAB]);
}

#[test]
fn test_unknown_message_leaves_counters_alone() {
    let packer = vehicle_packer();
    packer.encode(0x280, &SignalValues::new()).unwrap();

    let err = packer.encode(0xFFFF, &SignalValues::new()).unwrap_err();
    assert!(matches!(err, PackerError::UnknownMessage(0xFFFF)));
    assert_eq!(packer.counter(0xFFFF), None);
    assert_eq!(packer.counter(0x280), Some(0));
    assert!(matches!(packer.lookup(0xFFFF), Err(PackerError::UnknownMessage(0xFFFF))));
    // lookup never creates a placeholder
    assert!(packer.lookup(0xFFFF).is_err());
}

#[test]
fn test_independent_packers_do_not_share_counters() {
    let a = vehicle_packer();
    let b = vehicle_packer();
    for _ in 0..3 {
        a.encode(0x280, &SignalValues::new()).unwrap();
    }
    b.encode(0x280, &SignalValues::new()).unwrap();
    assert_eq!(a.counter(0x280), Some(2));
    assert_eq!(b.counter(0x280), Some(0));
}

/// Concurrent encoders for one address observe every counter value once.
#[test]
fn test_concurrent_encode_counter_total_order() {
    let packer = Arc::new(vehicle_packer());
    let counter = packer.lookup(0x280).unwrap().counter_signal().unwrap().clone();

    let mut seen: Vec<u64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let packer = Arc::clone(&packer);
                let counter = counter.clone();
                scope.spawn(move || {
                    (0..4)
                        .map(|_| {
                            read_field(&packer.encode(0x280, &SignalValues::new()).unwrap(), &counter)
                        })
                        .collect::<Vec<u64>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    seen.sort_unstable();
    assert_eq!(seen, (0..16).collect::<Vec<u64>>());
    assert_eq!(packer.counter(0x280), Some(15));
}

#[test]
fn test_catalog_distributed_as_msgpack() {
    let catalog = Catalog::from_json(CATALOG_JSON, &xor_registry()).unwrap();
    let packed = MsgPackCodec::encode(&catalog.to_def()).unwrap();

    let restored = Catalog::from_msgpack(&packed, &xor_registry()).unwrap();
    let original = FramePacker::new(catalog).unwrap();
    let copy = FramePacker::new(restored).unwrap();

    let input = values(&[("ANGLE", 12.5), ("TORQUE", 100.0), ("ACTIVE", 1.0)]);
    assert_eq!(
        original.encode(0x280, &input).unwrap(),
        copy.encode(0x280, &input).unwrap()
    );
}

#[test]
fn test_encode_frame_bytes() {
    let packer = vehicle_packer();
    let frame = packer.encode_frame(0x200, &values(&[("SPEED", 127.5)])).unwrap();
    assert_eq!(frame.address(), 0x200);
    assert_eq!(frame.data(), &[0xFF]);
    assert!(!frame.is_extended());
}

#[test]
fn test_unrelated_keys_ignored() {
    let packer = vehicle_packer();
    let mut input: HashMap<String, f64> = HashMap::new();
    input.insert("UNRELATED".to_string(), 1.0);
    input.insert("ACTIVE".to_string(), 1.0);
    let frame = packer.encode(0x280, &input).unwrap();
    assert_eq!(frame[4] & 0x01, 0x01);
}
