use std::io;
use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::debug;

use crate::config::{Action, KeyTable};
use crate::fileio::CsvStore;
use crate::list::{ITEM_COUNT, PLACEHOLDER};
use crate::mode::insert::{is_escape, EditBuffer, EditResult};
use crate::mode::Mode;
use crate::model::{ListModel, ModelError};
use crate::style::Style;
use crate::ui;
use crate::viewstate::ViewState;

pub type Model = ListModel<ViewState, CsvStore>;

pub struct App {
    pub model: Model,
    pub style: Style,
    pub mode: Mode,
    pub editor: EditBuffer,
    /// Slot picked up in move mode
    pub grabbed: Option<usize>,
    pub should_quit: bool,
    keys: KeyTable,
}

impl App {
    pub fn new(model: Model, style: Style, keys: KeyTable) -> Self {
        Self {
            model,
            style,
            mode: Mode::Normal,
            editor: EditBuffer::new(),
            grabbed: None,
            should_quit: false,
            keys,
        }
    }

    // Accessor methods for UI
    pub fn view(&self) -> &ViewState {
        self.model.view()
    }

    pub fn store_name(&self) -> String {
        self.model.store().file_name()
    }

    pub fn current_name(&self) -> Option<String> {
        self.model.current_list().map(|l| l.name().to_string())
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.model.view_mut().message = Some(msg.into());
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| ui::render(f, self))?;

            if poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.model.view_mut().message = None;
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => {
                if let Some(action) = self.action_for(key) {
                    self.perform(action);
                }
            }
            Mode::EditItem | Mode::EditName => self.handle_edit_key(key),
            Mode::MoveItem => self.handle_move_key(key),
            Mode::ConfirmDelete => self.handle_confirm_key(key),
        }

        if let Some(err) = self.model.take_save_error() {
            self.set_message(err);
        }
    }

    /// Map a normal-mode key to an action. Configurable bindings cover plain characters.
    fn action_for(&self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('z') if ctrl => Some(Action::Undo),
            KeyCode::Char('r') | KeyCode::Char('y') if ctrl => Some(Action::Redo),
            KeyCode::Char(c) if !ctrl => self.keys.get(c),
            KeyCode::Up => Some(Action::CursorUp),
            KeyCode::Down => Some(Action::CursorDown),
            KeyCode::Enter => Some(Action::EditItem),
            KeyCode::Tab => Some(Action::NextList),
            KeyCode::BackTab => Some(Action::PrevList),
            _ if is_escape(key) => Some(Action::Close),
            _ => None,
        }
    }

    pub fn perform(&mut self, action: Action) {
        debug!(?action, "Normal mode action");
        match action {
            Action::Undo => {
                let label = self.model.history().peek_undo().map(|t| t.describe());
                if self.model.undo() {
                    self.set_message(format!("Undo: {}", label.unwrap_or_default()));
                } else {
                    self.set_message("Nothing to undo");
                }
            }
            Action::Redo => {
                let label = self.model.history().peek_redo().map(|t| t.describe());
                if self.model.redo() {
                    self.set_message(format!("Redo: {}", label.unwrap_or_default()));
                } else {
                    self.set_message("Nothing to redo");
                }
            }
            Action::CursorUp => self.model.view_mut().move_cursor(-1),
            Action::CursorDown => self.model.view_mut().move_cursor(1),
            Action::MoveItemUp => self.move_selected(-1),
            Action::MoveItemDown => self.move_selected(1),
            Action::GrabItem => {
                if !self.model.has_current_list() {
                    return self.report(ModelError::NoCurrentList);
                }
                self.grabbed = Some(self.view().cursor);
                self.mode = Mode::MoveItem;
            }
            Action::EditItem => {
                let cursor = self.view().cursor;
                let Some(text) = self.model.current_list().and_then(|l| l.item(cursor)).cloned() else {
                    return self.report(ModelError::NoCurrentList);
                };
                self.editor.start_edit(&text);
                self.mode = Mode::EditItem;
            }
            Action::Rename => {
                let Some(name) = self.current_name() else {
                    return self.report(ModelError::NoCurrentList);
                };
                self.editor.start_edit(&name);
                self.mode = Mode::EditName;
            }
            Action::NewList => {
                if self.model.has_current_list() {
                    self.set_message("Close the current list before adding a new one");
                    return;
                }
                let id = self.model.add_new_list(Some("Untitled"), Some([PLACEHOLDER; ITEM_COUNT]));
                if let Err(e) = self.model.load_list(id) {
                    self.report(e);
                }
            }
            Action::DeleteList => {
                if self.model.has_current_list() {
                    self.mode = Mode::ConfirmDelete;
                } else {
                    self.report(ModelError::NoCurrentList);
                }
            }
            Action::NextList | Action::PrevList => {
                let delta = if action == Action::NextList { 1 } else { -1 };
                if let Some(id) = self.view().neighbour(delta) {
                    if let Err(e) = self.model.load_list(id) {
                        self.report(e);
                    }
                }
            }
            Action::Close => self.model.close(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Move the selected slot one position and keep the cursor on it
    fn move_selected(&mut self, delta: isize) {
        let old_index = self.view().cursor;
        let new_index = old_index as isize + delta;
        if new_index < 0 || new_index >= ITEM_COUNT as isize {
            return;
        }
        let new_index = new_index as usize;
        match self.model.request_move_item(old_index, new_index) {
            Ok(()) => self.model.view_mut().cursor = new_index,
            Err(e) => self.report(e),
        }
    }

    /// Cursor keys choose the drop slot; the grab key or Enter drops as a single move
    fn handle_move_key(&mut self, key: KeyEvent) {
        if is_escape(key) {
            if let Some(slot) = self.grabbed.take() {
                self.model.view_mut().cursor = slot;
            }
            self.mode = Mode::Normal;
            return;
        }

        match self.action_for(key) {
            Some(Action::CursorUp) => self.model.view_mut().move_cursor(-1),
            Some(Action::CursorDown) => self.model.view_mut().move_cursor(1),
            Some(Action::GrabItem) | Some(Action::EditItem) => self.drop_grabbed(),
            _ => {}
        }
    }

    fn drop_grabbed(&mut self) {
        self.mode = Mode::Normal;
        let Some(old_index) = self.grabbed.take() else {
            return;
        };
        let new_index = self.view().cursor;
        if old_index == new_index {
            return;
        }
        if let Err(e) = self.model.request_move_item(old_index, new_index) {
            self.report(e);
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match self.editor.handle_key(key) {
            EditResult::Continue => {}
            EditResult::Cancel => self.mode = Mode::Normal,
            EditResult::Commit(text) => {
                let result = match self.mode {
                    Mode::EditItem => {
                        let slot = self.view().cursor;
                        if text == self.editor.original() {
                            Ok(())
                        } else {
                            self.model.request_change_item(slot, text)
                        }
                    }
                    Mode::EditName => match self.model.current_id() {
                        Some(id) => self.model.change_name(id, &text),
                        None => Err(ModelError::NoCurrentList),
                    },
                    _ => Ok(()),
                };
                self.mode = Mode::Normal;
                if let Err(e) = result {
                    self.report(e);
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                if let Some(id) = self.model.current_id() {
                    if let Err(e) = self.model.delete_list(id) {
                        self.report(e);
                    }
                }
                self.mode = Mode::Normal;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => self.mode = Mode::Normal,
            _ if is_escape(key) => self.mode = Mode::Normal,
            _ => {}
        }
    }

    fn report(&mut self, err: ModelError) {
        debug!(error = %err, "Rejected request");
        self.set_message(err.to_string());
    }
}
