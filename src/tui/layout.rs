use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Stacked layout: article input, result, progress row, status bar
pub struct AppLayout {
    pub input_area: Rect,
    pub result_area: Rect,
    pub progress_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    pub fn new(area: Rect) -> Self {
        let vertical_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),          // Article input
                Constraint::Percentage(30),  // Result pane
                Constraint::Length(1),       // Progress indicator
                Constraint::Length(1),       // Status bar
            ])
            .split(area);

        Self {
            input_area: vertical_chunks[0],
            result_area: vertical_chunks[1],
            progress_area: vertical_chunks[2],
            status_area: vertical_chunks[3],
        }
    }
}
