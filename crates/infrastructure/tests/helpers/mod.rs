pub mod dns_server_mock;
pub mod request;

pub use dns_server_mock::{MockDnsServer, MockMode};
pub use request::*;
