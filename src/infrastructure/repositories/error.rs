use crate::domain::errors::DomainError;

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if db_err.is_unique_violation() {
                return DomainError::UniquenessViolation(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return DomainError::NotFound("referenced record not found".into());
            }
            if db_err.is_check_violation() {
                return DomainError::Validation("check constraint violated".into());
            }

            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
