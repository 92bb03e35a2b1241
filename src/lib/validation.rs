//! Input validation utilities
//!
//! Checks run on command-line inputs before any header is read, reported through the
//! structured error types in [`crate::errors`].

use std::path::Path;

use crate::errors::{HeaderError, Result};

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input BAM")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use pbheader_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.bam", "Input BAM");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.is_file() {
        return Err(HeaderError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    Ok(())
}

/// Validate that every path in `paths` exists
///
/// # Arguments
///
/// * `paths` - The paths to check, in order
/// * `description` - What the files are, used in the error message
///
/// # Errors
/// Returns an error for the first file that doesn't exist
pub fn validate_files_exist<P: AsRef<Path>>(paths: &[P], description: &str) -> Result<()> {
    for path in paths {
        validate_file_exists(path, description)?;
    }
    Ok(())
}

/// Validate that at least `min` values were supplied for a parameter
///
/// # Errors
/// Returns an error naming the parameter if fewer than `min` values are present
///
/// # Example
/// ```
/// use pbheader_lib::validation::validate_min_count;
///
/// assert!(validate_min_count(&["a.bam", "b.bam"], 1, "input").is_ok());
/// assert!(validate_min_count::<&str>(&[], 1, "input").is_err());
/// ```
pub fn validate_min_count<T>(values: &[T], min: usize, name: &str) -> Result<()> {
    if values.len() < min {
        return Err(HeaderError::InvalidParameter {
            parameter: name.to_string(),
            reason: format!("at least {min} value(s) required, got {}", values.len()),
        });
    }
    Ok(())
}
