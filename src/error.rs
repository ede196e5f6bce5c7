use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create texture for {path:?}: {reason}")]
    Texture { path: PathBuf, reason: String },

    #[error("failed to load audio {path:?}: {reason}")]
    Audio { path: PathBuf, reason: String },

    #[error("no image files found in directory {path:?}")]
    NoImages { path: PathBuf },

    #[error("loader for {path:?} stopped before finishing")]
    Interrupted { path: PathBuf },
}

impl LoadError {
    /// File the error is about, as shown to the user.
    pub fn file_name(&self) -> String {
        let path = match self {
            LoadError::Read { path, .. }
            | LoadError::Decode { path, .. }
            | LoadError::Texture { path, .. }
            | LoadError::Audio { path, .. }
            | LoadError::NoImages { path }
            | LoadError::Interrupted { path } => path,
        };
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    /// Short one-line notice for the sidebar.
    pub fn notice(&self) -> String {
        let what = match self {
            LoadError::Read { .. } => "unreadable",
            LoadError::Decode { .. } => "not a supported image",
            LoadError::Texture { .. } => "texture upload failed",
            LoadError::Audio { .. } => "audio not playable",
            LoadError::NoImages { .. } => "no images found",
            LoadError::Interrupted { .. } => "loading interrupted",
        };
        format!("{}: {}", self.file_name(), what)
    }
}
