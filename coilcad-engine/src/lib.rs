pub mod dimension;
pub mod layout;
pub mod notes;
pub mod views;

pub use dimension::DimensionEngine;
pub use layout::{LayoutOptions, generate_checked, generate_layout, generate_layout_with};

pub mod errors {
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum EngineError {
        #[error("invalid coil parameters: {}", issues.join("; "))]
        InvalidParameters { issues: Vec<String> },
    }
}
