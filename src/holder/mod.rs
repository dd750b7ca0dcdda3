/* src/holder/mod.rs */

//!
//! Atomic slot for the current serialized configuration value.
//!
//! Readers never block and always observe a complete value; writers swap in a
//! freshly built [`Entry`] as a whole.

mod entry;
mod error;
#[cfg(feature = "events")]
mod event;
mod meta;
mod slot;

pub use entry::Entry;
pub use error::HoldError;
#[cfg(feature = "events")]
pub use event::HoldEvent;
pub use meta::Meta;
pub use slot::Holder;
#[cfg(feature = "events")]
pub use slot::DEFAULT_EVENT_CAPACITY;
