pub mod error;
pub mod source;
pub mod types;

pub use error::{ExplorerError, Result};
pub use source::TradesSource;
