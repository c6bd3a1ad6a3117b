//! The `client` module is the producer side of the queue.
//!
//! It provides the `Publisher`, which stamps a post with the submission time
//! and sends it in the wire format the worker decodes.

pub mod publisher;
pub use publisher::Publisher;

#[cfg(test)]
mod tests;
