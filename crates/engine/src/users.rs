//! The module contains the representation of the utility's users,
//! residential persons or businesses.

use serde::{Deserialize, Serialize};

/// Variant-specific user data.
///
/// Residential and business users share the same registry and id space and
/// differ only in the fields below.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    Residential { name: String, surname: String },
    Business { business_name: String },
}

impl UserKind {
    /// Canonical kind tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Residential { .. } => "residential",
            Self::Business { .. } => "business",
        }
    }
}

/// A user holding one or more supply contracts.
///
/// `tax_code` is the fiscal identifier: the personal tax code for
/// residential users, the VAT number for businesses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub tax_code: String,
    pub address: String,
    pub email: String,
    pub kind: UserKind,
}

impl User {
    pub fn residential(
        id: String,
        tax_code: &str,
        name: &str,
        surname: &str,
        address: &str,
        email: &str,
    ) -> Self {
        Self {
            id,
            tax_code: tax_code.to_string(),
            address: address.to_string(),
            email: email.to_string(),
            kind: UserKind::Residential {
                name: name.to_string(),
                surname: surname.to_string(),
            },
        }
    }

    pub fn business(
        id: String,
        vat_number: &str,
        business_name: &str,
        address: &str,
        email: &str,
    ) -> Self {
        Self {
            id,
            tax_code: vat_number.to_string(),
            address: address.to_string(),
            email: email.to_string(),
            kind: UserKind::Business {
                business_name: business_name.to_string(),
            },
        }
    }

    /// Name shown on bills: "name surname", or the business name.
    pub fn display_name(&self) -> String {
        match &self.kind {
            UserKind::Residential { name, surname } => format!("{name} {surname}"),
            UserKind::Business { business_name } => business_name.clone(),
        }
    }
}
