pub mod data_transfer;
pub mod events;
pub mod session;
pub mod store;
