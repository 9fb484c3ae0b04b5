//! Widget state definitions.

/// How a line should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Normal display state - no interaction.
    #[default]
    Normal,
    /// The pointer is over the line or over another member of its group.
    Hovered,
    /// The line, or a member of its group, is selected.
    Selected,
}
