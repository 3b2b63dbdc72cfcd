// Re-export all model types from submodules
mod common;
mod trade;

#[cfg(test)]
pub(crate) mod fixtures;

// common only carries deserializers used by the trade payload
pub use trade::*;
