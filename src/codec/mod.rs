//! Codec module - serialization of catalog definitions.
//!
//! This module provides codecs for loading and exporting
//! [`CatalogDef`](crate::schema::CatalogDef) values:
//!
//! - [`JsonCodec`] - JSON using `serde_json`, for hand-written catalogs
//! - [`MsgPackCodec`] - MessagePack using `rmp-serde` (to_vec_named, struct-as-map)
//!
//! # Design
//!
//! Codecs are implemented as marker structs with static methods rather than trait objects.
//!
//! # Example
//!
//! ```
//! use canpack::codec::{JsonCodec, MsgPackCodec};
//! use canpack::schema::CatalogDef;
//!
//! let def: CatalogDef = JsonCodec::decode(br#"{"name": "demo", "messages": []}"#).unwrap();
//! let packed = MsgPackCodec::encode(&def).unwrap();
//! let restored: CatalogDef = MsgPackCodec::decode(&packed).unwrap();
//! assert_eq!(restored, def);
//! ```

mod json;
mod msgpack;

pub use json::JsonCodec;
pub use msgpack::MsgPackCodec;
