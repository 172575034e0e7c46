//! Header UI component: title and dataset switch button.

use crate::switcher::DatasetId;
use crate::ui::ThemeColors;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Chart title.
pub const TITLE: &str = "Scatter plot for housing market distributions";

/// Label of the switch button while `active` is shown.
pub fn button_label(active: DatasetId) -> String {
    format!("[ Switch to {} Data ]", active.other().name())
}

/// Where the switch button sits inside the header row.
pub fn button_rect(header: Rect, label: &str) -> Rect {
    let width = (label.width() as u16).min(header.width);
    Rect::new(header.right() - width, header.y, width, header.height.min(1))
}

/// Draw the header.
pub fn draw_header(f: &mut Frame<'_>, area: Rect, active: DatasetId, colors: &ThemeColors) {
    let title = Paragraph::new(TITLE).style(
        Style::default()
            .fg(colors.heading)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(title, area);

    let label = button_label(active);
    let button = Paragraph::new(label.as_str())
        .style(Style::default().fg(colors.button_fg).bg(colors.button_bg));
    f.render_widget(button, button_rect(area, &label));
}
