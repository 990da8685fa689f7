use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::Store;
use super::types::{NewSession, NewTransaction, NewUser, Session, Transaction, User};
use crate::errors::StoreResult;

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    sessions: Vec<Session>,
    transactions: Vec<Transaction>,
}

/// Process-local store backed by vectors in insertion order.
///
/// Used for local runs with `STORAGE_BACKEND=memory` and by the test suite.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users, including duplicates by email.
    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        user.check()?;
        let user = user.into_user(Uuid::new_v4(), Utc::now());
        self.tables.write().await.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_session(&self, session: NewSession) -> StoreResult<Session> {
        session.check()?;
        let session = session.into_session(Uuid::new_v4(), Utc::now());
        self.tables.write().await.sessions.push(session.clone());
        Ok(session)
    }

    async fn find_session_by_token_hash(&self, token_hash: &str) -> StoreResult<Option<Session>> {
        let tables = self.tables.read().await;
        Ok(tables
            .sessions
            .iter()
            .find(|s| s.token_hash == token_hash)
            .cloned())
    }

    async fn insert_transaction(&self, transaction: NewTransaction) -> StoreResult<Transaction> {
        transaction.check()?;
        let transaction = transaction.into_transaction(Uuid::new_v4(), Utc::now());
        self.tables
            .write()
            .await
            .transactions
            .push(transaction.clone());
        Ok(transaction)
    }

    async fn list_transactions(&self, user_id: Uuid) -> StoreResult<Vec<Transaction>> {
        let tables = self.tables.read().await;
        Ok(tables
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
