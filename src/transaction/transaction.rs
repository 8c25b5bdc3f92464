use crate::list::{RankedList, ITEM_COUNT};

/// A reversible unit of change applied to some target
pub trait Transaction {
    type Target;

    /// Apply the change (also used for redo)
    fn do_transaction(&self, target: &mut Self::Target);

    /// Reverse the change made by `do_transaction`
    fn undo_transaction(&self, target: &mut Self::Target);
}

/// Reversible edits to the slots of a single ranked list.
///
/// Each variant captures everything it needs to reverse itself when it is
/// built, so undo never re-reads the current state of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemTransaction {
    /// Replace the text of one slot
    ChangeItem {
        slot: usize,
        old_text: String,
        new_text: String,
    },
    /// Relocate one slot, shifting the items in between
    MoveItem { old_index: usize, new_index: usize },
}

impl ItemTransaction {
    pub fn change_item(slot: usize, old_text: String, new_text: String) -> Self {
        debug_assert!(slot < ITEM_COUNT, "slot {slot} out of range");
        ItemTransaction::ChangeItem { slot, old_text, new_text }
    }

    pub fn move_item(old_index: usize, new_index: usize) -> Self {
        debug_assert!(old_index < ITEM_COUNT && new_index < ITEM_COUNT);
        ItemTransaction::MoveItem { old_index, new_index }
    }

    /// Short label for status messages
    pub fn describe(&self) -> String {
        match self {
            ItemTransaction::ChangeItem { slot, new_text, .. } => {
                format!("item {} set to \"{}\"", slot + 1, new_text)
            }
            ItemTransaction::MoveItem { old_index, new_index } => {
                format!("item {} moved to {}", old_index + 1, new_index + 1)
            }
        }
    }
}

impl Transaction for ItemTransaction {
    type Target = RankedList;

    fn do_transaction(&self, list: &mut RankedList) {
        match self {
            ItemTransaction::ChangeItem { slot, new_text, .. } => {
                list.set_item(*slot, new_text.clone());
            }
            ItemTransaction::MoveItem { old_index, new_index } => {
                list.move_item(*old_index, *new_index);
            }
        }
    }

    fn undo_transaction(&self, list: &mut RankedList) {
        match self {
            ItemTransaction::ChangeItem { slot, old_text, .. } => {
                list.set_item(*slot, old_text.clone());
            }
            // the inverse of a single-element move is the move with indices swapped
            ItemTransaction::MoveItem { old_index, new_index } => {
                list.move_item(*new_index, *old_index);
            }
        }
    }
}
