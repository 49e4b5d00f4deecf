pub mod args;
pub mod cli;
pub mod errors;
pub mod output;

pub use args::ParameterArgs;
pub use cli::{RunOutcome, RunRequest, run};
pub use errors::FrontendError;
