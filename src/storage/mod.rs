//! Asset storage abstraction.
//!
//! Both download paths read source files through [`AssetStorage`]; the only
//! backend is a local directory rooted at the configured asset root.

mod backend;
mod local;

pub use backend::{AssetStorage, StorageError};
pub use local::LocalStorage;
