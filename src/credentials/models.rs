use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The two kinds of actor that can hold credentials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountKind {
    /// Pet owner (account-holder)
    Owner,
    /// Veterinarian (service-provider)
    Vet,
}

impl AccountKind {
    /// Table backing this kind in the relational store
    pub fn table(self) -> &'static str {
        match self {
            AccountKind::Owner => "owners",
            AccountKind::Vet => "vets",
        }
    }

    pub fn is_service_provider(self) -> bool {
        matches!(self, AccountKind::Vet)
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountKind::Owner => write!(f, "owner"),
            AccountKind::Vet => write!(f, "vet"),
        }
    }
}

/// Unique handle used to detect duplicates and look up credentials.
///
/// At least one of the two fields is always present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: Option<String>,
    phone: Option<String>,
}

impl Identity {
    /// Builds an identity from optional email/phone, trimming both.
    /// Returns `None` when neither carries a value.
    pub fn new(email: Option<String>, phone: Option<String>) -> Option<Self> {
        let email = normalize(email);
        let phone = normalize(phone);

        if email.is_none() && phone.is_none() {
            return None;
        }

        Some(Self { email, phone })
    }

    pub fn email(email: impl Into<String>) -> Option<Self> {
        Self::new(Some(email.into()), None)
    }

    pub fn phone(phone: impl Into<String>) -> Option<Self> {
        Self::new(None, Some(phone.into()))
    }

    pub fn email_address(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn phone_number(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// True when `other` shares the email or the phone with this identity
    pub fn overlaps(&self, other: &Identity) -> bool {
        let same_email = matches!((&self.email, &other.email), (Some(a), Some(b)) if a == b);
        let same_phone = matches!((&self.phone, &other.phone), (Some(a), Some(b)) if a == b);
        same_email || same_phone
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A stored account as returned by the credential store
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub kind: AccountKind,
    pub identity: Identity,
    pub full_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// An account that has not been persisted yet. The password is already digested.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub kind: AccountKind,
    pub identity: Identity,
    pub full_name: String,
    pub password_hash: String,
}

impl NewAccount {
    pub fn new(
        kind: AccountKind,
        identity: Identity,
        full_name: String,
        password_hash: String,
    ) -> Self {
        Self {
            kind,
            identity,
            full_name,
            password_hash,
        }
    }

    /// Materializes the stored record once the backend has assigned an id
    pub fn into_account(self, id: i64) -> Account {
        Account {
            id,
            kind: self.kind,
            identity: self.identity,
            full_name: self.full_name,
            password_hash: self.password_hash,
            created_at: Utc::now(),
        }
    }
}
