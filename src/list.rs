/// Number of ranked slots in every list
pub const ITEM_COUNT: usize = 5;

/// Text shown in a slot that has not been filled in yet
pub const PLACEHOLDER: &str = "?";

/// Identity of a list, assigned monotonically and never reused
pub type ListId = u64;

/// A named list of exactly five ranked items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedList {
    pub id: ListId,
    name: String,
    items: [String; ITEM_COUNT],
}

impl RankedList {
    pub fn new(id: ListId) -> Self {
        Self {
            id,
            name: "Untitled".to_string(),
            items: std::array::from_fn(|_| PLACEHOLDER.to_string()),
        }
    }

    /// Same list under another name, for building lists outside a collection
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace all slots. Missing slots become the placeholder, extra items are dropped.
    pub fn set_items<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut iter = items.into_iter();
        for slot in self.items.iter_mut() {
            *slot = iter.next().map(Into::into).unwrap_or_else(|| PLACEHOLDER.to_string());
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn item(&self, slot: usize) -> Option<&String> {
        self.items.get(slot)
    }

    pub fn set_item(&mut self, slot: usize, text: String) {
        debug_assert!(slot < ITEM_COUNT, "slot {slot} out of range");
        if let Some(item) = self.items.get_mut(slot) {
            *item = text;
        }
    }

    /// Remove the item at `old_index` and reinsert it at `new_index`.
    /// Items in between shift by one; this is not a swap.
    pub fn move_item(&mut self, old_index: usize, new_index: usize) {
        debug_assert!(old_index < ITEM_COUNT && new_index < ITEM_COUNT);
        if old_index >= ITEM_COUNT || new_index >= ITEM_COUNT {
            return;
        }
        if old_index < new_index {
            self.items[old_index..=new_index].rotate_left(1);
        } else if new_index < old_index {
            self.items[new_index..=old_index].rotate_right(1);
        }
    }
}

/// All lists, kept sorted by name
#[derive(Debug, Default)]
pub struct ListCollection {
    lists: Vec<RankedList>,
    next_id: ListId,
}

impl ListCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a list with the next id and insert it in sorted position
    pub fn add<I, S>(&mut self, name: Option<&str>, items: Option<I>) -> ListId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = self.next_id;
        self.next_id += 1;

        let mut list = RankedList::new(id);
        if let Some(name) = name {
            list.name = name.to_string();
        }
        if let Some(items) = items {
            list.set_items(items);
        }
        self.lists.push(list);
        self.sort();
        id
    }

    pub fn remove(&mut self, id: ListId) -> Option<RankedList> {
        let idx = self.index_of(id)?;
        Some(self.lists.remove(idx))
    }

    pub fn rename(&mut self, id: ListId, name: &str) -> bool {
        match self.lists.iter_mut().find(|l| l.id == id) {
            Some(list) => {
                list.name = name.to_string();
                self.sort();
                true
            }
            None => false,
        }
    }

    /// Ordinal, case-sensitive sort by name. Stable, so equal names keep insertion order.
    pub fn sort(&mut self) {
        self.lists.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn index_of(&self, id: ListId) -> Option<usize> {
        self.iter().position(|l| l.id == id)
    }

    pub fn get(&self, id: ListId) -> Option<&RankedList> {
        self.iter().find(|l| l.id == id)
    }

    /// Run `f` on the list with `id`, then restore name order
    pub fn edit<R>(&mut self, id: ListId, f: impl FnOnce(&mut RankedList) -> R) -> Option<R> {
        let list = self.lists.iter_mut().find(|l| l.id == id)?;
        let result = f(list);
        self.sort();
        Some(result)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedList> {
        self.lists.iter()
    }

    pub fn as_slice(&self) -> &[RankedList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn clear(&mut self) {
        self.lists.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(items: &[&str]) -> RankedList {
        let mut list = RankedList::new(0);
        list.set_items(items.iter().copied());
        list
    }

    #[test]
    fn test_new_list_has_placeholders() {
        let list = RankedList::new(3);
        assert_eq!(list.items().len(), ITEM_COUNT);
        assert!(list.items().iter().all(|s| s == PLACEHOLDER));
        assert_eq!(list.name(), "Untitled");
    }

    #[test]
    fn test_set_items_pads_and_truncates() {
        let short = list_of(&["A", "B"]);
        assert_eq!(short.items(), ["A", "B", "?", "?", "?"]);

        let long = list_of(&["1", "2", "3", "4", "5", "6", "7"]);
        assert_eq!(long.items(), ["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_move_item_down_shifts_between() {
        let mut list = list_of(&["A", "B", "C", "D", "E"]);
        list.move_item(1, 3);
        assert_eq!(list.items(), ["A", "C", "D", "B", "E"]);
    }

    #[test]
    fn test_move_item_up_shifts_between() {
        let mut list = list_of(&["A", "B", "C", "D", "E"]);
        list.move_item(4, 0);
        assert_eq!(list.items(), ["E", "A", "B", "C", "D"]);
    }

    #[test]
    fn test_move_item_same_index() {
        let mut list = list_of(&["A", "B", "C", "D", "E"]);
        list.move_item(2, 2);
        assert_eq!(list.items(), ["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_collection_sorted_by_name() {
        let mut lists = ListCollection::new();
        lists.add(Some("Movies"), None::<Vec<String>>);
        lists.add(Some("Books"), None::<Vec<String>>);
        lists.add(Some("bands"), None::<Vec<String>>);

        let names: Vec<&str> = lists.iter().map(|l| l.name()).collect();
        // case-sensitive: uppercase sorts before lowercase
        assert_eq!(names, vec!["Books", "Movies", "bands"]);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut lists = ListCollection::new();
        let a = lists.add(Some("a"), None::<Vec<String>>);
        let b = lists.add(Some("b"), None::<Vec<String>>);
        lists.remove(b);
        let c = lists.add(Some("c"), None::<Vec<String>>);
        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(c, 2);
    }

    #[test]
    fn test_rename_resorts() {
        let mut lists = ListCollection::new();
        let a = lists.add(Some("Alpha"), None::<Vec<String>>);
        lists.add(Some("Beta"), None::<Vec<String>>);

        assert!(lists.rename(a, "Zulu"));
        assert_eq!(lists.index_of(a), Some(1));
        assert!(!lists.rename(99, "nope"));
    }

    #[test]
    fn test_edit_keeps_name_order() {
        let mut lists = ListCollection::new();
        let a = lists.add(Some("Alpha"), None::<Vec<String>>);
        lists.add(Some("Beta"), None::<Vec<String>>);

        let moved = lists.edit(a, |list| {
            list.set_item(0, "first".to_string());
            *list = list.clone().with_name("Zulu");
            list.id
        });
        assert_eq!(moved, Some(a));
        let names: Vec<&str> = lists.iter().map(|l| l.name()).collect();
        assert_eq!(names, vec!["Beta", "Zulu"]);
        assert_eq!(lists.get(a).unwrap().items()[0], "first");

        assert_eq!(lists.edit(99, |_| ()), None);
    }
}
