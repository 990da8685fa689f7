pub mod ledger;

pub use ledger::{append, day_month, list};
