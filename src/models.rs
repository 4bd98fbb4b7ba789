//! Frontend Models
//!
//! View-only types. Domain entities live in `inventory-core`.

/// Top-level screens of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Dashboard,
    Inventory,
    Scanner,
    Chat,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [ViewMode::Dashboard, ViewMode::Inventory, ViewMode::Scanner, ViewMode::Chat];

    /// Sidebar label
    pub fn nav_label(&self) -> &'static str {
        match self {
            ViewMode::Dashboard => "Intelligence",
            ViewMode::Inventory => "Stock Manager",
            ViewMode::Scanner => "Vision Scanner",
            ViewMode::Chat => "Assistant",
        }
    }

    /// Header title
    pub fn title(&self) -> &'static str {
        match self {
            ViewMode::Dashboard => "Intelligence",
            ViewMode::Inventory => "Repository",
            ViewMode::Scanner => "Vision",
            ViewMode::Chat => "Assistant",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ViewMode::Dashboard => "📊",
            ViewMode::Inventory => "📦",
            ViewMode::Scanner => "📷",
            ViewMode::Chat => "💬",
        }
    }
}

/// Avatar initials: first two characters of the name, upper-cased
pub fn initials(name: &str) -> String {
    name.trim().chars().take(2).collect::<String>().to_uppercase()
}

/// First word of a display name
pub fn first_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or(name)
}
