mod controller;
mod state;

pub use controller::TradeChecker;
pub use state::{CheckerState, Field, RequestState, TradeForm};

#[cfg(test)]
pub(crate) use controller::tests::StubScorer;
