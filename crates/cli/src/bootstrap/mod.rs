mod config;
mod logging;
mod pid_file;

pub use config::load_config;
pub use logging::init_logging;
pub use pid_file::write_pid_file;
