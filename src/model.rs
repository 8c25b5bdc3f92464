use std::fmt;
use std::io;

use tracing::{debug, info, warn};

use crate::fileio::Store;
use crate::list::{ListCollection, ListId, RankedList, ITEM_COUNT};
use crate::transaction::{ItemTransaction, TransactionStack};

/// Rendering side of the model. Notified after every state change.
pub trait View {
    /// Redraw the slots of the loaded list
    fn refresh(&mut self, list: &RankedList);

    /// Redraw the summary of all lists
    fn refresh_lists(&mut self, lists: &[RankedList], current: Option<ListId>);

    /// Enable or disable the undo/redo affordances
    fn notify_history_state(&mut self, can_undo: bool, can_redo: bool);

    /// No list is loaded anymore
    fn clear_workspace(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    NoCurrentList,
    InvalidSlot(usize),
    UnknownList(ListId),
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::NoCurrentList => write!(f, "No list loaded"),
            ModelError::InvalidSlot(slot) => {
                write!(f, "Invalid slot {} (expected 1-{})", slot + 1, ITEM_COUNT)
            }
            ModelError::UnknownList(id) => write!(f, "Unknown list {}", id),
        }
    }
}

impl std::error::Error for ModelError {}

fn check_slot(slot: usize) -> Result<(), ModelError> {
    if slot < ITEM_COUNT {
        Ok(())
    } else {
        Err(ModelError::InvalidSlot(slot))
    }
}

/// Owns every list, the loaded list, and the undo history of the current session
pub struct ListModel<V: View, S: Store> {
    lists: ListCollection,
    current: Option<ListId>,
    tps: TransactionStack<ItemTransaction>,
    view: V,
    store: S,
    /// Last failed save, kept until the front end picks it up
    save_error: Option<String>,
}

impl<V: View, S: Store> ListModel<V, S> {
    pub fn new(view: V, store: S) -> Self {
        Self {
            lists: ListCollection::new(),
            current: None,
            tps: TransactionStack::new(),
            view,
            store,
            save_error: None,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn lists(&self) -> &ListCollection {
        &self.lists
    }

    pub fn history(&self) -> &TransactionStack<ItemTransaction> {
        &self.tps
    }

    pub fn has_current_list(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_id(&self) -> Option<ListId> {
        self.current
    }

    pub fn current_list(&self) -> Option<&RankedList> {
        self.current.and_then(|id| self.lists.get(id))
    }

    pub fn can_undo(&self) -> bool {
        self.tps.has_transaction_to_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.tps.has_transaction_to_redo()
    }

    pub fn take_save_error(&mut self) -> Option<String> {
        self.save_error.take()
    }

    // === List management (not undoable) ===

    pub fn add_new_list<I, T>(&mut self, name: Option<&str>, items: Option<I>) -> ListId
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let id = self.lists.add(name, items);
        debug!(id, "Added list");
        self.persist();
        self.refresh_lists();
        id
    }

    /// Make `id` the loaded list. Switching to a different list drops the undo history.
    pub fn load_list(&mut self, id: ListId) -> Result<(), ModelError> {
        let list = self.lists.get(id).ok_or(ModelError::UnknownList(id))?;

        if self.current != Some(id) {
            self.tps.clear_all_transactions();
            debug!(id, "Switched list, history cleared");
        }
        self.current = Some(id);
        self.view.refresh(list);
        self.refresh_lists();
        self.notify_history();
        Ok(())
    }

    /// Unload the current list and end its editing session
    pub fn close(&mut self) {
        self.current = None;
        self.tps.clear_all_transactions();
        self.view.clear_workspace();
        self.refresh_lists();
        self.notify_history();
    }

    pub fn change_name(&mut self, id: ListId, name: &str) -> Result<(), ModelError> {
        if !self.lists.rename(id, name) {
            return Err(ModelError::UnknownList(id));
        }
        debug!(id, name, "Renamed list");
        self.persist();
        self.refresh_lists();
        if let Some(list) = self.current.and_then(|id| self.lists.get(id)) {
            self.view.refresh(list);
        }
        Ok(())
    }

    pub fn delete_list(&mut self, id: ListId) -> Result<(), ModelError> {
        self.lists.remove(id).ok_or(ModelError::UnknownList(id))?;
        info!(id, "Deleted list");

        if self.current == Some(id) {
            self.current = None;
            self.tps.clear_all_transactions();
            self.view.clear_workspace();
            self.notify_history();
        }
        self.persist();
        self.refresh_lists();
        Ok(())
    }

    // === Persistence ===

    /// Replace all lists with the store's contents. Returns false when nothing was saved.
    pub fn load_lists(&mut self) -> io::Result<bool> {
        let Some(records) = self.store.load()? else {
            return Ok(false);
        };

        self.close();
        self.lists.clear();
        for record in records {
            self.lists.add(Some(record.name.as_str()), Some(record.items));
        }
        info!(count = self.lists.len(), "Loaded lists");
        self.refresh_lists();
        Ok(true)
    }

    pub fn save_lists(&mut self) -> io::Result<()> {
        self.store.save(self.lists.as_slice())
    }

    /// Save, logging failures instead of propagating them
    fn persist(&mut self) {
        if let Err(e) = self.save_lists() {
            warn!(error = %e, "Failed to save lists");
            self.save_error = Some(format!("Save failed: {}", e));
        }
    }

    // === Undoable edits ===

    pub fn request_change_item(&mut self, slot: usize, new_text: String) -> Result<(), ModelError> {
        check_slot(slot)?;
        let id = self.current.ok_or(ModelError::NoCurrentList)?;
        let old_text = self
            .lists
            .get(id)
            .ok_or(ModelError::UnknownList(id))?
            .item(slot)
            .cloned()
            .unwrap_or_default();

        let txn = ItemTransaction::change_item(slot, old_text, new_text);
        debug!(id, slot, "Change item");
        let tps = &mut self.tps;
        self.lists.edit(id, |list| tps.add_transaction(txn, list));
        self.after_edit();
        Ok(())
    }

    pub fn request_move_item(&mut self, old_index: usize, new_index: usize) -> Result<(), ModelError> {
        check_slot(old_index)?;
        check_slot(new_index)?;
        let id = self.current.ok_or(ModelError::NoCurrentList)?;
        if self.lists.get(id).is_none() {
            return Err(ModelError::UnknownList(id));
        }

        let txn = ItemTransaction::move_item(old_index, new_index);
        debug!(id, old_index, new_index, "Move item");
        let tps = &mut self.tps;
        self.lists.edit(id, |list| tps.add_transaction(txn, list));
        self.after_edit();
        Ok(())
    }

    /// Undo the most recent edit. Returns false if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.tps.has_transaction_to_undo() {
            return false;
        }
        let Some(id) = self.current else {
            return false;
        };
        let tps = &mut self.tps;
        if self.lists.edit(id, |list| tps.undo_transaction(list)).is_none() {
            return false;
        }
        self.after_edit();
        true
    }

    /// Reapply the most recently undone edit. Returns false if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.tps.has_transaction_to_redo() {
            return false;
        }
        let Some(id) = self.current else {
            return false;
        };
        let tps = &mut self.tps;
        if self.lists.edit(id, |list| tps.do_transaction(list)).is_none() {
            return false;
        }
        self.after_edit();
        true
    }

    // === Notifications ===

    fn after_edit(&mut self) {
        if let Some(list) = self.current.and_then(|id| self.lists.get(id)) {
            self.view.refresh(list);
        }
        self.persist();
        self.notify_history();
    }

    fn refresh_lists(&mut self) {
        self.view.refresh_lists(self.lists.as_slice(), self.current);
    }

    fn notify_history(&mut self) {
        let (can_undo, can_redo) = (self.can_undo(), self.can_redo());
        self.view.notify_history_state(can_undo, can_redo);
    }
}
