//! Reusable widget components.

pub mod artwork;
pub mod detail;
pub mod status;

pub use artwork::ArtworkFrame;
pub use detail::DetailPanel;
pub use status::StatusIndicator;
