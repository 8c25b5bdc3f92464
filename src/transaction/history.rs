use tracing::debug;

use super::transaction::Transaction;

/// Linear undo/redo history.
///
/// Transactions at or below the cursor have been applied; those above it
/// were undone and can be redone. Adding a transaction while there are
/// undone entries discards them.
#[derive(Debug)]
pub struct TransactionStack<T> {
    transactions: Vec<T>,
    /// Index of the most recently applied transaction, `None` when nothing is applied
    most_recent: Option<usize>,
}

impl<T: Transaction> Default for TransactionStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transaction> TransactionStack<T> {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
            most_recent: None,
        }
    }

    /// Number of applied transactions
    fn applied(&self) -> usize {
        self.most_recent.map_or(0, |i| i + 1)
    }

    /// Apply `txn` to `target` and record it after the cursor (drops the redo branch)
    pub fn add_transaction(&mut self, txn: T, target: &mut T::Target) {
        let applied = self.applied();
        if applied < self.transactions.len() {
            debug!(
                discarded = self.transactions.len() - applied,
                "Dropping undone transactions"
            );
            self.transactions.truncate(applied);
        }

        txn.do_transaction(target);
        self.transactions.push(txn);
        self.most_recent = Some(applied);
    }

    pub fn has_transaction_to_undo(&self) -> bool {
        self.most_recent.is_some()
    }

    pub fn has_transaction_to_redo(&self) -> bool {
        self.applied() < self.transactions.len()
    }

    /// Undo the transaction at the cursor. No-op (returns false) when there is nothing to undo.
    pub fn undo_transaction(&mut self, target: &mut T::Target) -> bool {
        let Some(idx) = self.most_recent else {
            return false;
        };
        self.transactions[idx].undo_transaction(target);
        self.most_recent = idx.checked_sub(1);
        true
    }

    /// Redo the transaction after the cursor. No-op (returns false) when there is nothing to redo.
    pub fn do_transaction(&mut self, target: &mut T::Target) -> bool {
        let next = self.applied();
        let Some(txn) = self.transactions.get(next) else {
            return false;
        };
        txn.do_transaction(target);
        self.most_recent = Some(next);
        true
    }

    /// Forget all history without undoing anything
    pub fn clear_all_transactions(&mut self) {
        self.transactions.clear();
        self.most_recent = None;
    }

    #[allow(dead_code)]
    pub fn size(&self) -> usize {
        self.transactions.len()
    }

    /// Transaction that `undo_transaction` would reverse
    pub fn peek_undo(&self) -> Option<&T> {
        self.most_recent.and_then(|i| self.transactions.get(i))
    }

    /// Transaction that `do_transaction` would reapply
    pub fn peek_redo(&self) -> Option<&T> {
        self.transactions.get(self.applied())
    }
}
