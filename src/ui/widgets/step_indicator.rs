//! Step indicator strip

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme;

/// One step in the indicator strip
pub struct IndicatorStep {
    pub title: String,
    /// The step has reported values since the wizard started
    pub finished: bool,
}

/// Horizontal strip showing every mounted step with the active one
/// highlighted and finished ones checked off.
pub struct StepIndicator<'a> {
    steps: &'a [IndicatorStep],
    current: usize,
}

impl<'a> StepIndicator<'a> {
    pub fn new(steps: &'a [IndicatorStep], current: usize) -> Self {
        Self { steps, current }
    }
}

impl Widget for StepIndicator<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans: Vec<Span> = vec![Span::raw(" ")];
        for (i, step) in self.steps.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" › ", theme::dim()));
            }
            let marker = if step.finished {
                "✓".to_string()
            } else {
                (i + 1).to_string()
            };
            let label = format!(" {} {} ", marker, step.title);
            let style = if i == self.current {
                theme::selected()
            } else if step.finished {
                theme::success()
            } else {
                theme::dim()
            };
            spans.push(Span::styled(label, style));
        }

        let paragraph = Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border()),
        );
        paragraph.render(area, buf);
    }
}
