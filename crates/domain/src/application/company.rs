//! Company details collected by the first step.

use serde::{Deserialize, Serialize};

use super::ApplicationError;

/// A single field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// All field errors found in one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// Returns the message recorded for a field, if any.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Converts into `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), ApplicationError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

/// Contact and store details of the applying brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub email: String,
    pub company_name: String,
    /// Storefront URL, e.g. `fitfuel.myshopify.com`.
    pub store_url: String,
    pub phone: String,
    /// Company registration number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_reg: Option<String>,
}

impl CompanyInfo {
    /// Validates every required field, collecting all failures.
    ///
    /// A blank registration number is normalised to `None`.
    pub fn validate(mut self) -> Result<Self, ApplicationError> {
        let mut errors = ValidationErrors::new();

        if self.email.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !is_valid_email(&self.email) {
            errors.add("email", "Invalid email format");
        }

        if self.company_name.trim().is_empty() {
            errors.add("company_name", "Company name is required");
        }

        if self.store_url.trim().is_empty() {
            errors.add("store_url", "Store URL is required");
        } else if !self.store_url.contains("shopify.com") {
            errors.add(
                "store_url",
                "Please enter a valid Shopify URL (e.g., yourstore.myshopify.com)",
            );
        }

        if self.phone.trim().is_empty() {
            errors.add("phone", "Phone number is required");
        }

        errors.into_result()?;

        if self
            .company_reg
            .as_deref()
            .is_some_and(|reg| reg.trim().is_empty())
        {
            self.company_reg = None;
        }
        Ok(self)
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the
/// domain with characters on both sides of it.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
