use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, info, instrument};

use crate::datalayer::CRUD::types::{NewTransaction, Transaction, User};
use crate::datalayer::Store;
use crate::errors::ServiceResult;

/// Every transaction recorded by `user`, in the order the backend returns them.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn list(store: &dyn Store, user: &User) -> ServiceResult<Vec<Transaction>> {
    let transactions = store.list_transactions(user.id).await?;

    debug!(count = transactions.len(), "Listed transactions");

    Ok(transactions)
}

/// Record a transaction for `user`, dated with today's server-local day and month.
#[instrument(skip(store, user), fields(user_id = %user.id))]
pub async fn append(
    store: &dyn Store,
    user: &User,
    kind: &str,
    description: &str,
    amount: f64,
) -> ServiceResult<Transaction> {
    append_on(store, user, kind, description, amount, Local::now().date_naive()).await
}

pub(crate) async fn append_on(
    store: &dyn Store,
    user: &User,
    kind: &str,
    description: &str,
    amount: f64,
    today: NaiveDate,
) -> ServiceResult<Transaction> {
    let transaction = store
        .insert_transaction(NewTransaction {
            user_id: user.id,
            kind: kind.to_string(),
            description: description.to_string(),
            amount,
            date: day_month(today),
        })
        .await?;

    info!(transaction_id = %transaction.id, "Transaction recorded");

    Ok(transaction)
}

/// `DD/MM` with no year.
pub fn day_month(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.day(), date.month())
}
