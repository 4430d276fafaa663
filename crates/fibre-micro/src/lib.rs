// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # Fibre Micro - Object-model introspection for embedded RPC
//!
//! A `no_std` core that lets a request-handling layer walk an application's
//! exposed object graph by a dotted path (`"axis0.motor.current_lim"`) and
//! read or write leaf values as text.
//!
//! ## Design Constraints
//!
//! - **No heap allocations**: registries are `const`-evaluated tables, handles
//!   are small `Copy` values
//! - **No `unsafe`**: the type-erased payload is a closed enum, typed views go
//!   through [`core::any::Any`]
//! - **`no_std` compatible**
//!
//! ## Architecture
//!
//! ```text
//! +-----------------------------------------+
//! |  Dispatch layer (wire protocol, USB)    |
//! +-----------------------------------------+
//!           v  path + text       ^  text / status
//! +-----------------------------------------+
//! |  Handle (resolve_path, get/set text)    |
//! +-----------------------------------------+
//!           v                    ^
//! +-----------------------------------------+
//! |  TypeRegistry / Entry (static tables)   |
//! +-----------------------------------------+
//!           v                    ^
//! +-----------------------------------------+
//! |  Leaf registries + text codec           |
//! +-----------------------------------------+
//!           v                    ^
//! +-----------------------------------------+
//! |  Property endpoints (read / exchange)   |
//! +-----------------------------------------+
//! ```
//!
//! ## Example
//!
//! ```
//! use fibre_micro::{introspect, Handle, Property, ReadOnly};
//!
//! struct Motor {
//!     current_lim: Property<f32>,
//!     pole_pairs: ReadOnly<i32>,
//! }
//!
//! introspect! {
//!     Motor {
//!         current_lim: Property<f32>,
//!         pole_pairs: ReadOnly<i32>,
//!     }
//! }
//!
//! let motor = Motor {
//!     current_lim: Property::new(10.0),
//!     pole_pairs: ReadOnly::new(7),
//! };
//!
//! let root = Handle::new(&motor);
//! let mut buf = [0u8; 16];
//!
//! let limit = root.resolve_path(b"current_lim", 11);
//! limit.set_from_text(b"12.5").unwrap();
//! let len = limit.get_as_text(&mut buf).unwrap();
//! assert_eq!(&buf[..len], b"12.5");
//!
//! assert!(root.child("pole_pairs").set_from_text(b"3").is_err());
//! ```
//!
//! ## Feature Flags
//!
//! - `std` -- Enable std (`std::error::Error` impl, host testing)
//! - `heapless` -- Enable [`Handle::get_string`]

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Text conversion contract for leaf values
pub mod codec;

/// Error types for Fibre Micro
pub mod error;

/// Navigation handle and path resolution
pub mod handle;

/// Leaf registries for property endpoints and computed values
pub mod leaf;

mod macros;

/// Property endpoints (read-only and read-write value accessors)
pub mod property;

/// Static per-type property registries
pub mod registry;

/// Leaf value representation (enum -> underlying integer)
pub mod value;

// Re-exports for convenience
pub use crate::codec::{from_text, to_text, Scalar, TextCodec};
pub use crate::error::{Error, Result};
pub use crate::handle::{Handle, Payload};
pub use crate::property::{ExchangeEndpoint, Property, ReadEndpoint, ReadOnly};
pub use crate::registry::{Entry, Introspect, Narrow, TypeRegistry};
pub use crate::value::LeafValue;

/// Recommended reply buffer size for dispatch layers formatting leaf values
pub const MAX_TEXT_LEN: usize = 64;

/// Version of Fibre Micro
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
