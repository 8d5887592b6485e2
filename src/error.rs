use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while decoding a WAV file into a [`crate::SampleStore`].
#[derive(Debug, Error)]
pub enum AudioLoadError {
    #[error("failed to open WAV file {path:?}")]
    Open {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("failed to decode {format} samples")]
    Decode {
        format: &'static str,
        #[source]
        source: hound::Error,
    },

    #[error("unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    #[error("file declares zero channels")]
    NoChannels,
}
