use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    pub fn validate_identifier(field: &str, value: &str) -> Result<(), AppError> {
        if value.trim().is_empty() {
            return Err(AppError::ValidationError(format!("{} cannot be empty", field)));
        }
        if value.len() > 255 {
            return Err(AppError::ValidationError(format!(
                "{} too long (max 255 characters)",
                field
            )));
        }
        Ok(())
    }

    pub fn validate_page(page: u32) -> Result<(), AppError> {
        if page < 1 {
            return Err(AppError::ValidationError(
                "Page must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_year(year: i32) -> Result<(), AppError> {
        if !(1900..=2100).contains(&year) {
            return Err(AppError::ValidationError(
                "Year must be between 1900 and 2100".to_string(),
            ));
        }
        Ok(())
    }
}
