pub mod dns;
pub mod signals;

pub use dns::start_dns_server;
pub use signals::{shutdown_signal, spawn_reload_on_signal};
