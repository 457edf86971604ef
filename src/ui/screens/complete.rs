//! Submission complete screen

use std::path::Path;

use ratatui::{
    layout::Alignment,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::layout::centered_fixed;
use crate::ui::screens::wizard::draw_footer;
use crate::ui::theme;

pub fn draw(frame: &mut Frame, title: &str, output: Option<&Path>, value_count: usize) {
    let area = frame.area();
    let center = centered_fixed(60, 12, area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("✓ Submission complete", theme::success())),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Wizard: ", theme::dim()),
            Span::styled(title.to_string(), theme::text()),
        ]),
        Line::from(vec![
            Span::styled("  Values: ", theme::dim()),
            Span::styled(value_count.to_string(), theme::text()),
        ]),
    ];
    if let Some(path) = output {
        lines.push(Line::from(vec![
            Span::styled("  Output: ", theme::dim()),
            Span::styled(path.display().to_string(), theme::text()),
        ]));
    }
    lines.push(Line::from(""));

    let content = Paragraph::new(lines).alignment(Alignment::Left).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_active())
            .title(Span::styled(" Done ", theme::title())),
    );
    frame.render_widget(content, center);

    let footer_area = ratatui::layout::Rect::new(
        center.x,
        (center.y + center.height).min(area.height.saturating_sub(1)),
        center.width,
        1,
    );
    draw_footer(
        frame,
        footer_area,
        &["Enter Quit".to_string(), "R Run again".to_string()],
    );
}
