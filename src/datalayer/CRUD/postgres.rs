use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use super::store::Store;
use super::types::{NewSession, NewTransaction, NewUser, Session, Transaction, User};
use crate::datalayer::db_ops::DbManager;
use crate::errors::StoreResult;

/// Store backed by the Postgres pool owned by [`DbManager`].
#[derive(Clone)]
pub struct PgStore {
    db: DbManager,
}

impl PgStore {
    pub fn new(db: DbManager) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn insert_user(&self, user: NewUser) -> StoreResult<User> {
        user.check()?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(Utc::now())
        .fetch_one(self.db.pool())
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(user)
    }

    async fn insert_session(&self, session: NewSession) -> StoreResult<Session> {
        session.check()?;

        let session = sqlx::query_as::<_, Session>(
            r#"
            INSERT INTO sessions (id, token_hash, user_id, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, token_hash, user_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&session.token_hash)
        .bind(session.user_id)
        .bind(Utc::now())
        .fetch_one(self.db.pool())
        .await?;

        Ok(session)
    }

    async fn find_session_by_token_hash(&self, token_hash: &str) -> StoreResult<Option<Session>> {
        let session = sqlx::query_as::<_, Session>(
            r#"SELECT id, token_hash, user_id, created_at FROM sessions WHERE token_hash = $1"#,
        )
        .bind(token_hash)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(session)
    }

    async fn insert_transaction(&self, transaction: NewTransaction) -> StoreResult<Transaction> {
        transaction.check()?;

        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (id, user_id, kind, description, amount, date, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, kind, description, amount, date, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(transaction.user_id)
        .bind(&transaction.kind)
        .bind(&transaction.description)
        .bind(transaction.amount)
        .bind(&transaction.date)
        .bind(Utc::now())
        .fetch_one(self.db.pool())
        .await?;

        Ok(transaction)
    }

    async fn list_transactions(&self, user_id: Uuid) -> StoreResult<Vec<Transaction>> {
        // No ORDER BY: rows come back in heap order
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT id, user_id, kind, description, amount, date, created_at
            FROM transactions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.pool())
        .await?;

        Ok(transactions)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.health_check().await.map(|_| ())
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn shutdown(&self) {
        self.db.shutdown().await;
    }
}
