use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidUrl { field: &'static str, input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidUrl { field, input } => write!(f, "{field} is not a valid URL: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty {
            field: "SMS_API_KEY",
        };
        assert_eq!(err.to_string(), "SMS_API_KEY must not be empty");

        let err = ValidationError::InvalidUrl {
            field: "SMS_API_URL",
            input: "not a url".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "SMS_API_URL is not a valid URL: not a url"
        );
    }
}
