//! Message domain module.
//!
//! # Module Structure
//!
//! - `model`: Chat message record (`Message`, `Sender`)
//! - `store`: Ordered, id-keyed message collection (`MessageStore`)
//!
//! # Usage
//!
//! ```ignore
//! use chatline_core::message::{Message, MessageStore, Sender};
//! ```

mod model;
mod store;

// Re-export public API
pub use model::{Message, Sender};
pub use store::MessageStore;
