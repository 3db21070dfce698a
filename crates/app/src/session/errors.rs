//! Session errors.

use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token is empty")]
    EmptyToken,

    #[error("failed to read token file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write token file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove token file {path}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
