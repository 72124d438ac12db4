use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate, Debug)]
pub struct RegisterInput {
    #[validate(length(min = 3, message = "Username must be at least 3 characters"))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Deserialize, Validate, Debug)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Deserialize, Debug)]
pub struct RefreshInput {
    pub refresh: String,
}

/// Input for the passwordless token mint. Any existing username is accepted.
#[derive(Deserialize, Validate, Debug)]
pub struct TokenForUserInput {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_fail_registration_validation() {
        let input = RegisterInput {
            username: "alice".to_string(),
            password: "short".to_string(),
        };
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("at least 8 characters"));
    }

    #[test]
    fn short_usernames_fail_registration_validation() {
        let input = RegisterInput {
            username: "al".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn well_formed_registration_passes() {
        let input = RegisterInput {
            username: "alice".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(input.validate().is_ok());
    }
}
