use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::sheet::SheetValues;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("spreadsheet API returned {status}: {details}")]
    Api { status: u16, details: String },
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("credentials error: {0}")]
    Credentials(String),
}

/// Tabular backing store addressed by 1-based row number; row 1 is the header.
#[async_trait]
pub trait SheetClient: Send + Sync {
    async fn read(&self) -> Result<SheetValues, SheetError>;

    async fn append(&self, rows: SheetValues) -> Result<(), SheetError>;

    async fn update(&self, row_index: usize, values: Vec<String>) -> Result<(), SheetError>;
}

/// Shape checks every implementation runs before touching the network.
pub fn validate_update(row_index: usize, _values: &[String]) -> Result<(), SheetError> {
    if row_index < 1 {
        return Err(SheetError::InvalidRequest(
            "rowIndex must be a 1-based row number".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_append(rows: &[Vec<String>]) -> Result<(), SheetError> {
    if rows.is_empty() {
        return Err(SheetError::InvalidRequest(
            "values must contain at least one row".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_rejects_row_zero() {
        assert!(matches!(
            validate_update(0, &[]),
            Err(SheetError::InvalidRequest(_))
        ));
        assert!(validate_update(1, &["Nome".to_string()]).is_ok());
    }

    #[test]
    fn append_rejects_empty_batch() {
        assert!(matches!(validate_append(&[]), Err(SheetError::InvalidRequest(_))));
        assert!(validate_append(&[vec!["Ana".to_string()]]).is_ok());
    }
}
