pub mod answers;
pub mod errors;
pub mod logging;
pub mod root;
pub mod server;
pub mod upstream;

pub use answers::AnswersConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
pub use upstream::UpstreamConfig;
