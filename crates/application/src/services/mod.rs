mod recurse_forwarder;

pub use recurse_forwarder::{ForwardedResponse, RecurseForwarder};
