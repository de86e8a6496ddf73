//! Cash flow input: the validated series and boundary parsing

mod series;
pub mod loader;

pub use series::{has_sign_change, CashflowSeries};
pub use loader::{load_projects, ProjectRecord};

use crate::error::ValidationError;

/// Parse a comma-separated list of cash flows (e.g. `"300, 300, 300"`)
pub fn parse_cashflows(raw: &str) -> Result<Vec<f64>, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyCashflows);
    }

    raw.split(',')
        .enumerate()
        .map(|(index, part)| {
            let part = part.trim();
            let value: f64 = part.parse().map_err(|_| ValidationError::NotANumber {
                index,
                raw: part.to_string(),
            })?;
            if !value.is_finite() {
                return Err(ValidationError::NotFinite { field: "cash flow", value });
            }
            Ok(value)
        })
        .collect()
}
