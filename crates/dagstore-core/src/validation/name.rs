use lazy_static::lazy_static;
use regex::Regex;

use super::{error_codes, ValidationError};

/// Longest node name accepted, in characters
pub const MAX_NAME_LENGTH: usize = 255;

lazy_static! {
    static ref NAME_PATTERN: Regex = Regex::new(r"^[A-Za-z]+$").expect("node name pattern is valid");
}

/// Check a node name against the allowed format: 1 to 255 ASCII letters
pub fn is_valid_name(name: &str) -> bool {
    // The pattern only admits ASCII, so byte length equals character count here
    NAME_PATTERN.is_match(name) && name.len() <= MAX_NAME_LENGTH
}

/// Same verdict as [`is_valid_name`], with the reason attached on failure
pub fn check_name(name: &str, path: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::new(
            error_codes::INVALID_NODE_NAME,
            "Node name must not be empty",
            Some(path),
        ));
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new(
            error_codes::INVALID_NODE_NAME,
            format!("Node name is longer than {} characters", MAX_NAME_LENGTH),
            Some(path),
        ));
    }

    if !is_valid_name(name) {
        return Err(ValidationError::new(
            error_codes::INVALID_NODE_NAME,
            format!("Node name '{}' must contain only the letters A-Z and a-z", name),
            Some(path),
        ));
    }

    Ok(())
}
