/* src/lib.rs */

//!
//! Bridges a remote key-value configuration store into a single serialized
//! configuration blob, kept current as the store reports changes.
//!
//! This crate integrates five components:
//!
//! - **store**: Boundary trait to the upstream store, plus an in-memory store.
//! - **extract**: Reads one key or a whole namespace from the store's cache.
//! - **format**: Serializes the read-out as JSON, YAML or `key=value` lines.
//! - **holder**: Atomic slot for the current serialized value.
//! - **listener**: Ordered registry of reload callbacks.
//!
//! [`Subscriber`] ties them together: it performs the first load at
//! construction and reloads on every change notification from the store.
//!
//! ## Feature Flags
//!
//! - `full`: Enables all features.
//! - `yaml`: YAML output via `serde_yaml`.
//! - `dispatch`: Queued delivery of change notifications on a tokio task.
//! - `events`: Broadcast of holder events, including failed reloads.
//!
//! ## Basic Usage
//!
//! See `demos/basic.rs` for a complete example.

pub mod extract;
pub mod format;
pub mod holder;
pub mod listener;
pub mod store;
pub mod subscriber;

pub use format::AnyFormat;
pub use subscriber::{Delivery, SubscribeError, Subscriber, SubscriberConf};
