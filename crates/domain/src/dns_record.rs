pub mod fqdn;
pub mod record_data;
pub mod record_type;

pub use fqdn::normalize_fqdn;
pub use record_data::RecordData;
pub use record_type::RecordType;
