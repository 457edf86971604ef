//! UI rendering module

pub mod layout;
pub mod render;
mod screens;
pub mod theme;
pub mod widgets;

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppMode};
use render::WizardRenderer;

/// Main draw function - dispatches to the appropriate screen
pub fn draw(frame: &mut Frame, app: &App, renderer: &dyn WizardRenderer) {
    match &app.mode {
        AppMode::Wizard => {
            renderer.draw_wizard(frame, app);
        }
        AppMode::Complete {
            output,
            value_count,
        } => {
            screens::complete::draw(frame, &app.wizard_title, output.as_deref(), *value_count);
        }
    }

    // Render exit confirmation popup on top of any screen
    if app.show_exit_confirm {
        draw_exit_confirm(frame);
    }
}

/// Draw the exit confirmation popup centered on screen
fn draw_exit_confirm(frame: &mut Frame) {
    let area = frame.area();
    let popup_width = 44;
    let popup_height = 7;
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let content = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Leave the wizard? Entered data is lost.",
            theme::text(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("[", theme::dim()),
            Span::styled("Enter/Y", theme::key_hint()),
            Span::styled("] Yes  [", theme::dim()),
            Span::styled("Esc/N", theme::key_hint()),
            Span::styled("] No", theme::dim()),
        ]),
    ])
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border_active())
            .title(Span::styled(" Exit ", theme::title())),
    );
    frame.render_widget(content, popup_area);
}
