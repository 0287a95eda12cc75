use crate::DomainError;
use std::sync::Arc;

const MAX_NAME_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Lowercases `name` and appends the trailing dot, rejecting names that cannot appear on the wire.
pub fn normalize_fqdn(name: &str) -> Result<Arc<str>, DomainError> {
    let trimmed = name.trim();
    if trimmed == "." {
        return Ok(Arc::from("."));
    }

    let bare = trimmed.strip_suffix('.').unwrap_or(trimmed);
    if bare.is_empty() {
        return Err(DomainError::InvalidDomainName("empty name".to_string()));
    }
    if bare.len() > MAX_NAME_LEN {
        return Err(DomainError::InvalidDomainName(format!(
            "'{}' is longer than {} characters",
            name, MAX_NAME_LEN
        )));
    }
    for label in bare.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains an empty label",
                name
            )));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' in '{}' is longer than {} characters",
                label, name, MAX_LABEL_LEN
            )));
        }
        if label.chars().any(|c| c.is_whitespace()) {
            return Err(DomainError::InvalidDomainName(format!(
                "'{}' contains whitespace",
                name
            )));
        }
    }

    let mut fqdn = bare.to_ascii_lowercase();
    fqdn.push('.');
    Ok(Arc::from(fqdn))
}
