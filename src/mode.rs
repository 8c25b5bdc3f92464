pub mod insert;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Editing the text of the selected slot
    EditItem,
    /// Renaming the loaded list
    EditName,
    /// Carrying a grabbed slot to its drop position
    MoveItem,
    /// Waiting for y/n before deleting the loaded list
    ConfirmDelete,
}

impl Mode {
    pub fn display_name(&self) -> &'static str {
        match self {
            Mode::Normal => "NORMAL",
            Mode::EditItem => "EDIT",
            Mode::EditName => "RENAME",
            Mode::MoveItem => "MOVE",
            Mode::ConfirmDelete => "DELETE?",
        }
    }
}
