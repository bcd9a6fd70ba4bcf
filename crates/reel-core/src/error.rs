#![forbid(unsafe_code)]

//! Error type shared by the reel crates.

use thiserror::Error;

/// Errors surfaced by carousel construction and context access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// A control was mounted or rendered without a live carousel ancestor.
    #[error("{component} must be used within a <Carousel />")]
    OutsideCarousel {
        /// Name of the offending component (`"Previous"`, `"Dots"`, ...).
        component: &'static str,
    },

    /// A command was issued against an adapter whose engine was torn down.
    #[error("scroll engine has been destroyed")]
    EngineDestroyed,

    /// Configuration rejected while parsing.
    #[error("invalid carousel configuration: {0}")]
    InvalidConfig(String),
}

/// Standard result type for reel APIs.
pub type Result<T> = std::result::Result<T, CarouselError>;
