use miette::Diagnostic;
use thiserror::Error;

/// Main error type for shapesplit operations
#[derive(Error, Diagnostic, Debug)]
pub enum SplitError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(shapesplit::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Image error with {path}: {message}")]
    #[diagnostic(code(shapesplit::image))]
    Image {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(shapesplit::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(shapesplit::config))]
    Configuration {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Naming table error: {message}")]
    #[diagnostic(code(shapesplit::structure))]
    Structure {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Pixel {colour} has no alpha channel, but the image declares one")]
    #[diagnostic(code(shapesplit::alpha))]
    MissingAlphaChannel { colour: crate::types::Colour },
}

pub type Result<T> = std::result::Result<T, SplitError>;
