pub mod apply;
pub mod interactive;

use anyhow::{anyhow, Result};

use smatrix_store::StorageError;

/// Text shown to the user for a rejected operation.
///
/// Corruption is not a user error: it comes back as `Err` so the caller
/// aborts instead of printing and carrying on.
pub fn user_message(err: &StorageError) -> Result<String> {
    match err {
        StorageError::InvalidValue { value } if *value == 0.0 => {
            Ok("you can not add 0 in the matrix".to_string())
        }
        StorageError::OutOfBounds { .. } => Ok("Row or Col out of bound".to_string()),
        StorageError::StorageCorruption { .. } => {
            Err(anyhow!(err.clone()).context("Matrix storage is corrupt"))
        }
        other => Ok(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let zero = StorageError::InvalidValue { value: 0.0 };
        assert_eq!(user_message(&zero).unwrap(), "you can not add 0 in the matrix");

        let nan = StorageError::InvalidValue { value: f64::NAN };
        assert!(user_message(&nan).unwrap().starts_with("Invalid value NaN"));

        let extent = StorageError::InvalidExtent { rows: 0, columns: 2 };
        assert!(user_message(&extent).unwrap().contains("0x2"));

        let corrupt = StorageError::StorageCorruption {
            detail: "row chain 1 is cyclic".to_string(),
        };
        assert!(user_message(&corrupt).is_err());
    }
}
