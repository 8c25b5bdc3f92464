use crate::list::{ListId, RankedList, ITEM_COUNT};
use crate::model::View;

/// Name and id of a list, as shown in the sidebar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSummary {
    pub id: ListId,
    pub name: String,
}

/// Snapshot of what the terminal UI draws, kept current by the model
#[derive(Debug, Default)]
pub struct ViewState {
    pub lists: Vec<ListSummary>,
    /// Loaded list, highlighted in the sidebar
    pub highlighted: Option<ListId>,
    /// Items of the loaded list
    pub slots: Option<Vec<String>>,
    pub title: Option<String>,
    pub can_undo: bool,
    pub can_redo: bool,
    /// Selected slot
    pub cursor: usize,
    pub message: Option<String>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let max = ITEM_COUNT as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        let id = self.highlighted?;
        self.lists.iter().position(|l| l.id == id)
    }

    /// Id of the sidebar entry `delta` steps away from the loaded list, wrapping around
    pub fn neighbour(&self, delta: isize) -> Option<ListId> {
        if self.lists.is_empty() {
            return None;
        }
        let len = self.lists.len() as isize;
        let idx = match self.highlighted_index() {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta < 0 => len - 1,
            None => 0,
        };
        self.lists.get(idx as usize).map(|l| l.id)
    }
}

impl View for ViewState {
    fn refresh(&mut self, list: &RankedList) {
        self.slots = Some(list.items().to_vec());
        self.title = Some(format!("Top 5 {}", list.name()));
    }

    fn refresh_lists(&mut self, lists: &[RankedList], current: Option<ListId>) {
        self.lists = lists
            .iter()
            .map(|l| ListSummary { id: l.id, name: l.name().to_string() })
            .collect();
        self.highlighted = current;
    }

    fn notify_history_state(&mut self, can_undo: bool, can_redo: bool) {
        self.can_undo = can_undo;
        self.can_redo = can_redo;
    }

    fn clear_workspace(&mut self) {
        self.slots = None;
        self.title = None;
        self.cursor = 0;
    }
}
