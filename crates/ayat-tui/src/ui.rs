use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use crate::app::App;

const SPINNER_FRAMES: [&str; 10] = [
    "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
];

const ACCENT: Color = Color::Green;
const MUTED: Color = Color::DarkGray;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, status, footer
    let [header_area, body_area, status_area, footer_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header_area);

    app.card_area = None;
    app.dot_areas.clear();

    if app.loading && app.window.is_empty() {
        render_loading(app, frame, body_area);
    } else if app.window.is_empty() {
        render_empty(app, frame, body_area);
    } else {
        render_carousel(app, frame, body_area);
    }

    render_status(app, frame, status_area);
    render_footer(app, frame, footer_area);
}

fn render_header(frame: &mut Frame, area: Rect) {
    let header = Text::from(vec![
        Line::from(Span::styled(
            "DAILY QURAN VERSES",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Seek guidance and inspiration from the Holy Quran",
            Style::default().fg(MUTED),
        )),
    ]);

    frame.render_widget(Paragraph::new(header).alignment(Alignment::Center), area);
}

fn spinner(app: &App) -> &'static str {
    SPINNER_FRAMES[app.animation_frame % SPINNER_FRAMES.len()]
}

fn render_loading(app: &App, frame: &mut Frame, area: Rect) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let line = Line::from(vec![
        Span::styled(spinner(app), Style::default().fg(ACCENT).bold()),
        Span::raw(" Loading verses..."),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), middle);
}

fn render_empty(app: &App, frame: &mut Frame, area: Rect) {
    let message = if app.error.is_some() {
        "No verses loaded. Press r to try again.".to_string()
    } else if app.window.chapter > 0 {
        format!("No verses found for surah {}. Press r for more.", app.window.chapter)
    } else {
        "Press r to get verses.".to_string()
    };

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(message).style(Style::default().fg(MUTED)).alignment(Alignment::Center),
        middle,
    );
}

fn render_carousel(app: &mut App, frame: &mut Frame, area: Rect) {
    let [card_row, dots_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    let [left_arrow, card_area, right_arrow] = Layout::horizontal([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(card_row);

    let arrow_style = if app.carousel.can_move() {
        Style::default().fg(ACCENT).bold()
    } else {
        Style::default().fg(MUTED)
    };
    render_arrow(frame, left_arrow, "←", arrow_style);
    render_arrow(frame, right_arrow, "→", arrow_style);

    render_card(app, frame, card_area);
    app.card_area = Some(card_area);

    app.dot_areas = dot_hitboxes(app.carousel.len(), dots_area);
    let dots: Vec<Span> = (0..app.carousel.len())
        .flat_map(|i| {
            let style = if i == app.carousel.index() {
                Style::default().fg(ACCENT)
            } else {
                Style::default().fg(MUTED)
            };
            let dot = Span::styled("●", style);
            if i == 0 {
                vec![dot]
            } else {
                vec![Span::raw(" "), dot]
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(dots)).alignment(Alignment::Center), dots_area);
}

fn render_arrow(frame: &mut Frame, area: Rect, arrow: &str, style: Style) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled(arrow, style)).alignment(Alignment::Center),
        middle,
    );
}

fn render_card(app: &App, frame: &mut Frame, area: Rect) {
    let Some(triple) = app.current() else {
        return;
    };

    let label_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let text_style = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(triple.original.text.clone(), text_style.fg(ACCENT)))
            .alignment(Alignment::Center),
        Line::raw(""),
    ];

    for (label, record) in [
        (&app.config.translation_a.label, &triple.translation_a),
        (&app.config.translation_b.label, &triple.translation_b),
    ] {
        lines.push(Line::from(Span::styled(label.clone(), label_style)));
        lines.push(Line::from(Span::styled(record.text.clone(), text_style)));
        lines.push(Line::raw(""));
    }

    lines.push(
        Line::from(Span::styled(
            format!(" Surah {}, Verse {} ", triple.original.chapter, triple.original.verse),
            Style::default().fg(Color::Black).bg(ACCENT),
        ))
        .alignment(Alignment::Center),
    );

    let title = if app.loading {
        format!(" {} Loading... ", spinner(app))
    } else {
        format!(" {} of {} ", app.carousel.index() + 1, app.carousel.len())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(title);

    let card = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(card, area);
}

/// One single-cell rect per dot, matching the centered `● ● ●` line
fn dot_hitboxes(count: usize, area: Rect) -> Vec<Rect> {
    if count == 0 || area.height == 0 {
        return Vec::new();
    }

    let width = (count * 2 - 1) as u16;
    let start = area.x + area.width.saturating_sub(width) / 2;

    (0..count as u16)
        .map(|i| start + i * 2)
        .filter(|&x| x < area.x + area.width)
        .map(|x| Rect::new(x, area.y, 1, 1))
        .collect()
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(error) = &app.error {
        frame.render_widget(
            Paragraph::new(error.as_str())
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center),
            area,
        );
    }
}

/// Digit keys reach at most the first nine dots
fn jump_hint(len: usize) -> String {
    format!(" 1-{} ", len.min(9))
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = Vec::new();
    if app.carousel.can_move() {
        hints.extend([
            Span::styled(" ←/→ ", key_style),
            Span::styled(" verse ", label_style),
            Span::styled(jump_hint(app.carousel.len()), key_style),
            Span::styled(" jump ", label_style),
        ]);
    }
    hints.extend([
        Span::styled(" r ", key_style),
        Span::styled(" more verses ", label_style),
        Span::styled(" q ", key_style),
        Span::styled(" quit ", label_style),
        Span::styled("  API provided by Quran API (fawazahmed0)", Style::default().fg(MUTED)),
    ]);

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_hitboxes_are_centered() {
        let boxes = dot_hitboxes(3, Rect::new(0, 10, 11, 1));
        let xs: Vec<u16> = boxes.iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![3, 5, 7]);
        assert!(boxes.iter().all(|r| r.y == 10 && r.width == 1));
    }

    #[test]
    fn test_jump_hint_follows_window_length() {
        assert_eq!(jump_hint(2), " 1-2 ");
        assert_eq!(jump_hint(5), " 1-5 ");
        assert_eq!(jump_hint(12), " 1-9 ");
    }

    #[test]
    fn test_no_dots_for_empty_window() {
        assert!(dot_hitboxes(0, Rect::new(0, 0, 20, 1)).is_empty());
    }
}
