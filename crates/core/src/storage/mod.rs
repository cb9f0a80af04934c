mod error;
mod traits;
mod types;

pub use error::{Result, StoreError, UpdateError};
pub use traits::ItemStore;
pub use types::{Assignment, ItemUpdate, ScanOutput, WriteAck};
