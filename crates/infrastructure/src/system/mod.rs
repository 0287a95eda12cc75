mod host_resolver;

pub use host_resolver::SystemHostResolver;
