//! Code-list parsing for batch scans.

use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in code list")]
    EmptyToken,

    #[error("duplicate code: {0}")]
    DuplicateCode(String),
}

/// Parse a comma-separated code list: trim, uppercase, reject empties and
/// duplicates, preserve order.
pub fn parse_codes(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let code = trimmed.to_uppercase();
        if seen.contains(&code) {
            return Err(UniverseError::DuplicateCode(code));
        }
        seen.insert(code.clone());
        codes.push(code);
    }

    Ok(codes)
}
