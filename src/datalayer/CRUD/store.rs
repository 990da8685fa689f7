use async_trait::async_trait;
use uuid::Uuid;

use super::types::{NewSession, NewTransaction, NewUser, Session, Transaction, User};
use crate::errors::StoreResult;

/// Persistence seam shared by every request handler.
///
/// Each method is a single round trip to the backend. Implementations run
/// `check()` on the insert shapes before writing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Store: Send + Sync {
    /// Inserts a user. Duplicate emails are not rejected.
    async fn insert_user(&self, user: NewUser) -> StoreResult<User>;

    /// First stored user with this exact email, if any.
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn insert_session(&self, session: NewSession) -> StoreResult<Session>;

    async fn find_session_by_token_hash(&self, token_hash: &str) -> StoreResult<Option<Session>>;

    async fn insert_transaction(&self, transaction: NewTransaction) -> StoreResult<Transaction>;

    /// Transactions owned by `user_id`, in whatever order the backend yields them.
    async fn list_transactions(&self, user_id: Uuid) -> StoreResult<Vec<Transaction>>;

    /// Cheap round trip used by readiness probes.
    async fn ping(&self) -> StoreResult<()>;

    /// Human-readable backend name for logs and health output.
    fn backend_name(&self) -> &'static str;

    async fn shutdown(&self) {}
}
