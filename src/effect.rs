use std::fmt;

/// Side-effect descriptor produced by activating the current selection.
///
/// Strategies only describe the action; execution belongs to the screen
/// controller that owns the stores and platform collaborators. Indices refer
/// to the active screen's content list at the moment of activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    // Main screen
    ToggleTheme,
    OpenSettings,
    ExitApp,
    OpenGroups,
    ToggleFormat,
    ClearHistory,
    PasteItem(usize),
    OpenSelectGroup(usize),
    TogglePin(usize),
    DeleteItem(usize),
    // Groups screen
    AddGroup,
    CloseGroups,
    OpenGroup(usize),
    EditGroup(usize),
    DeleteGroup(usize),
    // Group content screen
    CloseGroupContent,
    PasteGroupItem(usize),
    EditGroupItem(usize),
    RemoveGroupItem(usize),
    // Select-group dialog
    CloseDialog,
    AddToGroup(usize),
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::ToggleTheme => write!(f, "toggle theme"),
            Effect::OpenSettings => write!(f, "open settings"),
            Effect::ExitApp => write!(f, "exit"),
            Effect::OpenGroups => write!(f, "open groups"),
            Effect::ToggleFormat => write!(f, "toggle paste format"),
            Effect::ClearHistory => write!(f, "clear history"),
            Effect::PasteItem(i) => write!(f, "paste item {}", i),
            Effect::OpenSelectGroup(i) => write!(f, "send item {} to group", i),
            Effect::TogglePin(i) => write!(f, "toggle pin on item {}", i),
            Effect::DeleteItem(i) => write!(f, "delete item {}", i),
            Effect::AddGroup => write!(f, "add group"),
            Effect::CloseGroups => write!(f, "close groups"),
            Effect::OpenGroup(i) => write!(f, "open group {}", i),
            Effect::EditGroup(i) => write!(f, "edit group {}", i),
            Effect::DeleteGroup(i) => write!(f, "delete group {}", i),
            Effect::CloseGroupContent => write!(f, "close group content"),
            Effect::PasteGroupItem(i) => write!(f, "paste group item {}", i),
            Effect::EditGroupItem(i) => write!(f, "edit group item {}", i),
            Effect::RemoveGroupItem(i) => write!(f, "remove group item {}", i),
            Effect::CloseDialog => write!(f, "close dialog"),
            Effect::AddToGroup(i) => write!(f, "add to group {}", i),
        }
    }
}
