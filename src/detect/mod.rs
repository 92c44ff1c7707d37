// src/detect/mod.rs

//! Poll-based change detection.
//!
//! Each watched file gets a [`WatchTarget`] holding the last observed
//! [`Signature`]. Asking a target whether it changed compares the current
//! state against that signature using only the signals its
//! [`SignalPolicy`](crate::types::SignalPolicy) enables, cheapest first, and
//! commits the new signature whenever the answer is yes.
//!
//! There is no event subscription here: the caller decides when to ask.

pub mod hash;
pub mod signature;
pub mod target;

pub use hash::{compute_checksum, Checksum, HASH_BLOCK_SIZE};
pub use signature::Signature;
pub use target::WatchTarget;
