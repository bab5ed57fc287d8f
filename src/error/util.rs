//! Utility functions for error handling
//!
//! Helpers for file access that attach the path and purpose to failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{CbrError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(CbrError::io(
            path,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found (needed for: {purpose})"),
            ),
        ));
    }

    if !path.is_file() {
        return Err(CbrError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Path is not a file (expected a file for: {purpose})"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                "Permission denied - check file permissions".to_string()
            }
            _ => format!("Failed to open file for: {purpose}"),
        };
        CbrError::io(path, io::Error::new(e.kind(), format!("{context}: {e}")))
    })
}

/// Safely read a file to string with rich error information
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    match io::Read::read_to_string(&mut file, &mut content) {
        Ok(_) => Ok(content),
        Err(e) => {
            let context = match e.kind() {
                io::ErrorKind::InvalidData => {
                    "File contains invalid UTF-8 data - cannot read as text".to_string()
                }
                _ => format!("Failed to read file content for: {purpose}"),
            };
            Err(CbrError::io(
                path,
                io::Error::new(e.kind(), format!("{context}: {e}")),
            ))
        }
    }
}
