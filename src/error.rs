use std::path::PathBuf;

use thiserror::Error;


pub type Result<T> = std::result::Result<T, ErrorKind>;

#[derive(Error, Debug)]
pub enum YarndError {
    #[error("loading manifest {} failed: {source}", .path.display())]
    Manifest { path: PathBuf, source: ErrorKind },

    #[error("writing command line failed: {}", .0)]
    Output(ErrorKind),
}

#[derive(Error, Debug)]
pub enum ErrorKind {
    #[error("io error: {}", .0)]
    Io(#[from]std::io::Error),

    #[error("deserializing failed: {}", .0)]
    Serde(#[from]serde_json::Error),

    #[error("unable to locate executable: {}", .0)]
    Which(#[from]which::Error),
}
