mod answers_source;
mod host_resolver;
mod upstream_transport;

pub use answers_source::AnswersSource;
pub use host_resolver::HostResolver;
pub use upstream_transport::UpstreamTransport;
