pub mod types;

pub use types::{NewSession, NewTransaction, NewUser, Session, Transaction, User};
