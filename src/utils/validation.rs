use crate::error::{Error, Result};

/// Ten ASCII digits, no country code.
pub fn is_valid_mobile(mobile: &str) -> bool {
    mobile.len() == 10 && mobile.bytes().all(|b| b.is_ascii_digit())
}

pub fn ensure_mobile(mobile: &str) -> Result<()> {
    if is_valid_mobile(mobile) {
        Ok(())
    } else {
        Err(Error::BadRequest(
            "Please enter a valid 10-digit mobile number".to_string(),
        ))
    }
}

/// Fails with the list of absent field names, in the order given.
pub fn ensure_present(fields: &[(&str, bool)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::BadRequest(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )))
    }
}
