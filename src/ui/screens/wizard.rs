//! The wizard screen: header, step indicator, active form, action bar

use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::form::{FieldKind, FieldState};
use crate::ui::theme;
use crate::ui::widgets::{IndicatorStep, Spinner, StepIndicator};

/// Draw a centered header with the wizard title
pub fn draw_header(frame: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(Line::from(Span::styled(title, theme::title())))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border_active()),
        );
    frame.render_widget(header, area);
}

/// Default step indicator strip
pub fn draw_indicator(frame: &mut Frame, area: Rect, app: &App) {
    let steps: Vec<IndicatorStep> = app
        .controller
        .step_entries()
        .iter()
        .map(|entry| IndicatorStep {
            title: entry.config.title.clone(),
            finished: app.controller.has_step_data(&entry.name),
        })
        .collect();
    frame.render_widget(StepIndicator::new(&steps, app.controller.current()), area);
}

/// Default active-step body: the form's fields with inline errors
pub fn draw_body(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.active_form() else {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No steps are mounted.",
            theme::dim(),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme::border()),
        );
        frame.render_widget(empty, area);
        return;
    };

    let mut lines = vec![Line::from("")];
    for (i, field) in form.fields().iter().enumerate() {
        let active = i == form.active() && !app.controller.is_submitting();
        lines.push(field_line(field, active));
        if let Some(err) = &field.error {
            lines.push(Line::from(Span::styled(
                format!("      ⚠ {}", err),
                theme::error(),
            )));
        }
        lines.push(Line::from(""));
    }

    if app.controller.is_submitting() {
        let spinner = Spinner::new(app.spinner_state);
        lines.push(Line::from(vec![
            Span::styled(format!("  [{}] ", spinner.char()), theme::info()),
            Span::styled("Submitting...", theme::text()),
        ]));
    } else if let Some(err) = &app.error {
        lines.push(Line::from(Span::styled(
            format!("  ✗ {}", err),
            theme::error(),
        )));
    }

    let body = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::border())
            .title(Span::styled(format!(" {} ", form.title()), theme::title())),
    );
    frame.render_widget(body, area);
}

/// Default action bar, derived from the navigation buttons
pub fn draw_actions(frame: &mut Frame, area: Rect, app: &App) {
    let hints = footer_hints(app);
    draw_footer(frame, area, &hints);
}

/// One rendered form field: label, value (masked when secret), cursor mark
fn field_line(field: &FieldState, active: bool) -> Line<'static> {
    let label = format!("  {:<22}", format!("{}:", field.spec.label));
    let value_style = if active { theme::selected() } else { theme::text() };

    let mut spans = vec![Span::styled(label, theme::dim())];
    match field.spec.kind {
        FieldKind::Flag => {
            let mark = if field.flag { "[x] yes" } else { "[ ] no" };
            spans.push(Span::styled(mark.to_string(), value_style));
            if active {
                spans.push(Span::styled("  (space to toggle)", theme::dim()));
            }
        }
        _ => {
            let shown = if field.spec.secret {
                "*".repeat(field.input.len())
            } else {
                field.input.clone()
            };
            if shown.is_empty() && !active {
                if let Some(placeholder) = &field.spec.placeholder {
                    spans.push(Span::styled(placeholder.clone(), theme::dim()));
                }
            } else {
                let display = if active { format!("{}_", shown) } else { shown };
                spans.push(Span::styled(display, value_style));
            }
        }
    }
    Line::from(spans)
}

/// Key hints for the current position, "Key Label" pairs
pub fn footer_hints(app: &App) -> Vec<String> {
    if app.controller.is_submitting() {
        return vec!["... Submitting".to_string()];
    }
    let buttons = app.controller.nav_buttons();
    let mut hints = vec!["Tab Next field".to_string()];
    if buttons.submit {
        hints.push("Enter Submit".to_string());
    } else if buttons.next {
        hints.push("Enter Continue".to_string());
    }
    if buttons.previous {
        hints.push("Esc Back".to_string());
    } else {
        hints.push("Esc Quit".to_string());
    }
    hints
}

/// Draw a footer with key hints
pub fn draw_footer(frame: &mut Frame, area: Rect, hints: &[String]) {
    let spans: Vec<Span> = hints
        .iter()
        .enumerate()
        .flat_map(|(i, hint)| {
            let mut v = vec![];
            if i > 0 {
                v.push(Span::styled("  ", theme::dim()));
            }
            v.push(Span::styled("[", theme::dim()));
            let parts: Vec<&str> = hint.splitn(2, ' ').collect();
            if parts.len() == 2 {
                v.push(Span::styled(parts[0].to_string(), theme::key_hint()));
                v.push(Span::styled(format!("] {}", parts[1]), theme::dim()));
            } else {
                v.push(Span::styled(hint.clone(), theme::key_hint()));
                v.push(Span::styled("]", theme::dim()));
            }
            v
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}
