//! `FILE:LINE` entry identifiers

use crate::domain::entry::SourceLocation;
use crate::error::{OrgendaError, Result};
use std::path::PathBuf;

/// Parse `FILE:LINE`, splitting at the last colon so paths may contain colons.
pub fn parse_location(raw: &str) -> Result<SourceLocation> {
    let (path, line) = raw
        .rsplit_once(':')
        .ok_or_else(|| OrgendaError::InvalidLocation(raw.to_string()))?;

    if path.is_empty() {
        return Err(OrgendaError::EmptyDocumentPath);
    }

    let line: usize = line
        .trim()
        .parse()
        .map_err(|_| OrgendaError::InvalidLocation(raw.to_string()))?;
    if line < 1 {
        return Err(OrgendaError::InvalidLocation(raw.to_string()));
    }

    Ok(SourceLocation::new(PathBuf::from(path), line))
}
