//! Flat-file storage for parlo: recordings, syntheses, sidecar text files,
//! and the extension-filtered listings the home page renders.

pub mod error;
pub mod store;

pub use {
    error::{Error, Result},
    store::MediaStore,
};
