//! Crate-level error type, aggregating the failure domains a host sees
//! when driving the editor end to end.

use crate::persist::PersistenceError;
use crate::store::StoreError;
use pagecanvas_config::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
