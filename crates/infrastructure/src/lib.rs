//! answer-dns infrastructure: hickory request handling, upstream transports and the answers file.
pub mod answers;
pub mod dns;
pub mod system;
