pub mod error;
pub mod stores;

pub use error::HandlerError;
pub use stores::handle;
