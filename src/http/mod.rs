//! Request execution and the fixed-concurrency dispatcher.
mod client;
mod dispatcher;
mod execution;

#[cfg(test)]
mod test_server;

pub use client::build_client;
pub use dispatcher::{DispatchOutcome, DispatchReport, Dispatcher, partition};
pub use execution::execute_get;
