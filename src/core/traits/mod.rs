pub mod notifier;
pub mod token_store;
pub mod transport;
