use blob_tree::blob::DecodeError;
use std::path::PathBuf;
use thiserror_no_std::Error;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("Could not read {path:?}: {error}")]
    Read {
        path: PathBuf,
        error: std::io::Error,
    },
    #[error("Could not decode the blob: {0}")]
    Decode(DecodeError),
    #[error("Could not write the output: {0}")]
    Output(std::io::Error),
    #[error("{0} of the requested paths could not be found")]
    Unresolved(usize),
}
