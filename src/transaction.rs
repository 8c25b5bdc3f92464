pub mod history;
pub mod transaction;

#[cfg(test)]
mod test;

pub use history::TransactionStack;
pub use transaction::ItemTransaction;
