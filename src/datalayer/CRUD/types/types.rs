use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "sqlx")]
use sqlx::FromRow;
use uuid::Uuid;

use crate::errors::StoreError;

/// User struct matching the users table schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Session struct matching the sessions table schema.
///
/// Only the SHA-256 digest of the bearer token is stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Session {
    pub id: Uuid,
    pub token_hash: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Transaction struct matching the transactions table schema
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "valor")]
    pub amount: f64,
    /// Day and month of the write, `DD/MM`.
    #[serde(rename = "data")]
    pub date: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone)]
pub struct NewSession {
    pub token_hash: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub user_id: Uuid,
    pub kind: String,
    pub description: String,
    pub amount: f64,
    pub date: String,
}

fn require_non_empty(field: &str, value: &str) -> Result<(), StoreError> {
    if value.is_empty() {
        return Err(StoreError::InvalidRecord(format!("{} must not be empty", field)));
    }
    Ok(())
}

impl NewUser {
    /// Shape check run by every backend before insert.
    pub fn check(&self) -> Result<(), StoreError> {
        require_non_empty("name", &self.name)?;
        require_non_empty("email", &self.email)?;
        require_non_empty("password_hash", &self.password_hash)
    }

    pub fn into_user(self, id: Uuid, created_at: DateTime<Utc>) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at,
        }
    }
}

impl NewSession {
    pub fn check(&self) -> Result<(), StoreError> {
        require_non_empty("token_hash", &self.token_hash)
    }

    pub fn into_session(self, id: Uuid, created_at: DateTime<Utc>) -> Session {
        Session {
            id,
            token_hash: self.token_hash,
            user_id: self.user_id,
            created_at,
        }
    }
}

impl NewTransaction {
    pub fn check(&self) -> Result<(), StoreError> {
        require_non_empty("kind", &self.kind)?;
        require_non_empty("description", &self.description)?;

        if !self.amount.is_finite() {
            return Err(StoreError::InvalidRecord(
                "amount must be a finite number".to_string(),
            ));
        }

        // Any leap year accepts every valid day/month pair.
        let valid_date = NaiveDate::parse_from_str(&format!("{}/2000", self.date), "%d/%m/%Y")
            .is_ok()
            && self.date.len() == 5;
        if !valid_date {
            return Err(StoreError::InvalidRecord(format!(
                "date must be DD/MM, got {:?}",
                self.date
            )));
        }

        Ok(())
    }

    pub fn into_transaction(self, id: Uuid, created_at: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            user_id: self.user_id,
            kind: self.kind,
            description: self.description,
            amount: self.amount,
            date: self.date,
            created_at,
        }
    }
}
