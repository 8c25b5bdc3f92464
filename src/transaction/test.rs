use super::transaction::*;
use super::history::*;

use crate::list::{RankedList, ITEM_COUNT};


fn make_list(items: &[&str]) -> RankedList {
    let mut list = RankedList::new(0);
    list.set_items(items.iter().copied());
    list
}

fn abcde() -> RankedList {
    make_list(&["A", "B", "C", "D", "E"])
}

/// Helper to get the items as Vec<String> for assertion comparisons
fn items(list: &RankedList) -> Vec<String> {
    list.items().to_vec()
}

fn change(list: &RankedList, slot: usize, new_text: &str) -> ItemTransaction {
    ItemTransaction::change_item(slot, list.item(slot).unwrap().clone(), new_text.to_string())
}

// === ChangeItem tests ===

#[test]
fn test_change_item_do() {
    let mut list = abcde();
    let txn = change(&list, 2, "Z");

    txn.do_transaction(&mut list);
    assert_eq!(items(&list), vec!["A", "B", "Z", "D", "E"]);
}

#[test]
fn test_change_item_undo() {
    let mut list = abcde();
    let txn = change(&list, 2, "Z");

    txn.do_transaction(&mut list);
    txn.undo_transaction(&mut list);
    assert_eq!(items(&list), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn test_change_item_undo_uses_captured_text() {
    let mut list = abcde();
    let txn = change(&list, 0, "Z");

    txn.do_transaction(&mut list);
    // someone else touches the slot; undo still restores what was captured
    list.set_item(0, "other".to_string());
    txn.undo_transaction(&mut list);
    assert_eq!(list.item(0).unwrap(), "A");
}

// === MoveItem tests ===

#[test]
fn test_move_item_do() {
    let mut list = abcde();
    let txn = ItemTransaction::move_item(1, 3);

    txn.do_transaction(&mut list);
    assert_eq!(items(&list), vec!["A", "C", "D", "B", "E"]);
}

#[test]
fn test_move_item_undo() {
    let mut list = abcde();
    let txn = ItemTransaction::move_item(1, 3);

    txn.do_transaction(&mut list);
    txn.undo_transaction(&mut list);
    assert_eq!(items(&list), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn test_move_item_same_index_is_noop() {
    let mut list = abcde();
    let txn = ItemTransaction::move_item(3, 3);

    txn.do_transaction(&mut list);
    assert_eq!(items(&list), vec!["A", "B", "C", "D", "E"]);
    txn.undo_transaction(&mut list);
    assert_eq!(items(&list), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn test_move_item_inverse_all_pairs() {
    let original = abcde();
    for old_index in 0..ITEM_COUNT {
        for new_index in 0..ITEM_COUNT {
            let mut list = original.clone();
            let txn = ItemTransaction::move_item(old_index, new_index);

            txn.do_transaction(&mut list);
            assert_eq!(list.item(new_index), original.item(old_index));
            txn.undo_transaction(&mut list);
            assert_eq!(items(&list), items(&original), "move {old_index} -> {new_index}");
        }
    }
}

// === TransactionStack tests ===

#[test]
fn test_fresh_stack_has_nothing() {
    let stack: TransactionStack<ItemTransaction> = TransactionStack::new();
    assert!(!stack.has_transaction_to_undo());
    assert!(!stack.has_transaction_to_redo());
    assert_eq!(stack.size(), 0);
}

#[test]
fn test_add_executes_immediately() {
    let mut list = abcde();
    let mut stack = TransactionStack::new();

    let txn = change(&list, 2, "Z");
    stack.add_transaction(txn, &mut list);

    assert_eq!(list.item(2).unwrap(), "Z");
    assert!(stack.has_transaction_to_undo());
    assert!(!stack.has_transaction_to_redo());
}

#[test]
fn test_undo_then_redo_change() {
    let mut list = abcde();
    let mut stack = TransactionStack::new();

    let txn = change(&list, 2, "Z");
    stack.add_transaction(txn, &mut list);

    assert!(stack.undo_transaction(&mut list));
    assert_eq!(list.item(2).unwrap(), "C");
    assert!(stack.has_transaction_to_redo());

    assert!(stack.do_transaction(&mut list));
    assert_eq!(list.item(2).unwrap(), "Z");
    assert!(!stack.has_transaction_to_redo());
}

#[test]
fn test_undo_all_restores_original() {
    let mut list = abcde();
    let original = items(&list);
    let mut stack = TransactionStack::new();

    let txn = change(&list, 0, "first");
    stack.add_transaction(txn, &mut list);
    stack.add_transaction(ItemTransaction::move_item(0, 4), &mut list);
    let txn = change(&list, 4, "again");
    stack.add_transaction(txn, &mut list);
    stack.add_transaction(ItemTransaction::move_item(2, 1), &mut list);
    assert_ne!(items(&list), original);

    for _ in 0..4 {
        assert!(stack.undo_transaction(&mut list));
    }
    assert_eq!(items(&list), original);
    assert!(!stack.has_transaction_to_undo());
}

#[test]
fn test_redo_reproduces_state_before_undo() {
    let mut list = abcde();
    let mut stack = TransactionStack::new();

    stack.add_transaction(ItemTransaction::move_item(4, 0), &mut list);
    let txn = change(&list, 1, "X");
    stack.add_transaction(txn, &mut list);
    let before_undo = items(&list);

    stack.undo_transaction(&mut list);
    stack.do_transaction(&mut list);
    assert_eq!(items(&list), before_undo);
}

#[test]
fn test_new_transaction_truncates_redo() {
    let mut list = abcde();
    let mut stack = TransactionStack::new();

    let first = change(&list, 0, "1");
    stack.add_transaction(first.clone(), &mut list);
    let txn = change(&list, 1, "2");
    stack.add_transaction(txn, &mut list);
    let txn = change(&list, 2, "3");
    stack.add_transaction(txn, &mut list);

    stack.undo_transaction(&mut list);
    stack.undo_transaction(&mut list);
    assert!(stack.has_transaction_to_redo());

    let replacement = ItemTransaction::move_item(0, 4);
    stack.add_transaction(replacement.clone(), &mut list);

    assert_eq!(stack.size(), 2);
    assert!(!stack.has_transaction_to_redo());
    assert_eq!(stack.peek_undo(), Some(&replacement));
    assert_eq!(items(&list), vec!["B", "C", "D", "E", "1"]);

    stack.undo_transaction(&mut list);
    assert_eq!(stack.peek_undo(), Some(&first));
}

#[test]
fn test_undo_on_empty_is_noop() {
    let mut list = abcde();
    let mut stack: TransactionStack<ItemTransaction> = TransactionStack::new();

    assert!(!stack.undo_transaction(&mut list));
    assert!(!stack.do_transaction(&mut list));
    assert_eq!(items(&list), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn test_redo_past_end_is_noop() {
    let mut list = abcde();
    let mut stack = TransactionStack::new();

    let txn = change(&list, 3, "Q");
    stack.add_transaction(txn, &mut list);
    let after = items(&list);

    assert!(!stack.do_transaction(&mut list));
    assert_eq!(items(&list), after);
}

#[test]
fn test_undo_past_start_is_noop() {
    let mut list = abcde();
    let mut stack = TransactionStack::new();

    stack.add_transaction(ItemTransaction::move_item(0, 1), &mut list);
    assert!(stack.undo_transaction(&mut list));
    assert!(!stack.undo_transaction(&mut list));
    assert_eq!(items(&list), vec!["A", "B", "C", "D", "E"]);
}

#[test]
fn test_clear_does_not_undo() {
    let mut list = abcde();
    let mut stack = TransactionStack::new();

    let txn = change(&list, 0, "kept");
    stack.add_transaction(txn, &mut list);
    stack.undo_transaction(&mut list);
    let txn = change(&list, 1, "also kept");
    stack.add_transaction(txn, &mut list);

    stack.clear_all_transactions();
    assert_eq!(stack.size(), 0);
    assert!(!stack.has_transaction_to_undo());
    assert!(!stack.has_transaction_to_redo());
    assert_eq!(list.item(1).unwrap(), "also kept");
}

#[test]
fn test_peek() {
    let mut list = abcde();
    let mut stack = TransactionStack::new();
    assert_eq!(stack.peek_undo(), None);

    let txn = ItemTransaction::move_item(1, 2);
    stack.add_transaction(txn.clone(), &mut list);
    assert_eq!(stack.peek_undo(), Some(&txn));
    assert_eq!(stack.peek_redo(), None);

    stack.undo_transaction(&mut list);
    assert_eq!(stack.peek_undo(), None);
    assert_eq!(stack.peek_redo(), Some(&txn));
}

#[test]
fn test_describe() {
    assert_eq!(
        ItemTransaction::change_item(0, "a".into(), "b".into()).describe(),
        "item 1 set to \"b\""
    );
    assert_eq!(ItemTransaction::move_item(1, 3).describe(), "item 2 moved to 4");
}
