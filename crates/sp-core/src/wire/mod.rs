//! Binary pattern messages
//!
//! Flat, order-preserving encoding of `(is_valid, parts)` for handing
//! patterns between processes.

mod codec;
mod format;

pub use codec::*;
pub use format::*;
