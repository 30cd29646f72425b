//! Simulated login and registration forms.
//!
//! There is no backing service; the rules here only decide which
//! notification the user sees and whether the fake round-trip starts.
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("one or more required fields are empty")]
    MissingFields,
    #[error("password and confirmation differ")]
    PasswordMismatch,
    #[error("terms were not accepted")]
    TermsNotAccepted,
}

impl AuthError {
    /// Catalog key of the user-facing message.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::MissingFields => "notice.auth.fill_all",
            Self::PasswordMismatch => "notice.auth.mismatch",
            Self::TermsNotAccepted => "notice.auth.terms",
        }
    }
}

/// Which auth form an event or effect refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthForm {
    Login,
    Register,
}

/// Values of the submitted login form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// Post-delay check: both fields present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Values of the submitted registration form. `terms` mirrors whether the
/// checkbox contributed a value to the form data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub terms: bool,
}

impl RegisterForm {
    /// Pre-delay validation, in order: all fields, matching passwords, terms.
    ///
    /// # Errors
    ///
    /// Returns the first rule that fails.
    pub fn validate(&self) -> Result<(), AuthError> {
        let fields = [
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(AuthError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if !self.terms {
            return Err(AuthError::TermsNotAccepted);
        }
        Ok(())
    }
}

/// Password inputs with a visibility toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PasswordField {
    Password,
    ConfirmPassword,
}

impl PasswordField {
    /// Element id of the input.
    #[must_use]
    pub const fn element_id(self) -> &'static str {
        match self {
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }

    #[must_use]
    pub fn from_element_id(id: &str) -> Option<Self> {
        match id {
            "password" => Some(Self::Password),
            "confirmPassword" => Some(Self::ConfirmPassword),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RegisterForm {
        RegisterForm {
            username: "steve".into(),
            email: "steve@example.com".into(),
            password: "creeper123".into(),
            confirm_password: "creeper123".into(),
            terms: true,
        }
    }

    #[test]
    fn valid_registration_passes() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn each_empty_field_is_rejected() {
        let mutations: [fn(&mut RegisterForm); 4] = [
            |f| f.username.clear(),
            |f| f.email.clear(),
            |f| f.password.clear(),
            |f| f.confirm_password.clear(),
        ];
        for mutate in mutations {
            let mut form = valid();
            mutate(&mut form);
            assert_eq!(form.validate(), Err(AuthError::MissingFields));
        }
    }

    #[test]
    fn mismatch_is_checked_before_terms() {
        let form = RegisterForm {
            confirm_password: "other".into(),
            terms: false,
            ..valid()
        };
        assert_eq!(form.validate(), Err(AuthError::PasswordMismatch));
    }

    #[test]
    fn missing_terms_is_rejected() {
        let form = RegisterForm {
            terms: false,
            ..valid()
        };
        assert_eq!(form.validate(), Err(AuthError::TermsNotAccepted));
    }

    #[test]
    fn login_completeness() {
        assert!(
            LoginForm {
                username: "alex".into(),
                password: "pw".into()
            }
            .is_complete()
        );
        assert!(!LoginForm::default().is_complete());
    }

    #[test]
    fn password_fields_map_to_ids() {
        assert_eq!(
            PasswordField::from_element_id(PasswordField::ConfirmPassword.element_id()),
            Some(PasswordField::ConfirmPassword)
        );
        assert_eq!(PasswordField::from_element_id("username"), None);
    }
}
