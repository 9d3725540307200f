use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("take must be greater than zero, got {0}")]
    InvalidTake(i64),
    #[error("invalid value for {key}: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            PaginationError::InvalidTake(0).to_string(),
            "take must be greater than zero, got 0"
        );
        let err = PaginationError::InvalidEnv {
            key: "PAGINATION_MAX_PAGES",
            value: "lots".to_string(),
        };
        assert_eq!(err.to_string(), "invalid value for PAGINATION_MAX_PAGES: \"lots\"");
    }
}
