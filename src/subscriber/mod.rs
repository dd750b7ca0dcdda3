/* src/subscriber/mod.rs */

//!
//! Subscriber: keeps a serialized copy of an upstream namespace current.
//!
//! - [`Subscriber`] - the live handle
//! - [`SubscriberConf`] - construction settings
//! - [`Delivery`] - inline or queued change dispatch

mod conf;
mod dispatch;
mod error;
mod inner;
mod live;

pub use conf::{
	DEFAULT_CLUSTER, DEFAULT_NAMESPACE, DEFAULT_QUEUE_CAPACITY, Delivery, SubscriberConf,
};
pub use error::SubscribeError;
pub use live::Subscriber;
