mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, Popup};
use crate::theme::Theme;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let theme = &app.theme;

    f.render_widget(Block::default().style(Style::default().bg(theme.background)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(1),
            Constraint::Length(3), // Base / Tax fields
            Constraint::Length(1),
            Constraint::Length(1), // Tip badge
            Constraint::Length(1), // Tip slider
            Constraint::Length(1), // Split badge
            Constraint::Length(1), // Split slider
            Constraint::Length(1),
            Constraint::Length(3), // Per person
            Constraint::Length(3), // Total
            Constraint::Min(0),
            Constraint::Length(1), // Info line
            Constraint::Length(1), // Footer
        ])
        .split(area);

    // Recomputed on every frame from whatever the controls hold now
    let breakdown = app.breakdown();

    draw_header(f, theme, chunks[0]);
    draw_fields(f, app, chunks[2]);

    let body = |rect: Rect| inset(rect, 2);
    f.render_widget(components::badge(breakdown.tip_label(), theme), body(chunks[4]));
    f.render_widget(
        components::slider(app.tip_percent, &app.tip_range, app.field == Field::Tip, theme),
        body(chunks[5]),
    );
    f.render_widget(components::badge(breakdown.split_label(), theme), body(chunks[6]));
    f.render_widget(
        components::slider(app.split_count, &app.split_range, app.field == Field::Split, theme),
        body(chunks[7]),
    );

    f.render_widget(components::amount_box(breakdown.per_person_label(), theme), body(chunks[9]));
    f.render_widget(components::amount_box(breakdown.total_label(), theme), body(chunks[10]));

    draw_info_line(f, app, chunks[12]);
    draw_footer(f, app, chunks[13]);

    if app.popup == Popup::Help {
        draw_help_popup(f, theme);
    }
}

/// Shrink a row horizontally by `margin` cells on each side
fn inset(rect: Rect, margin: u16) -> Rect {
    let margin = margin.min(rect.width / 2);
    Rect {
        x: rect.x + margin,
        width: rect.width - margin * 2,
        ..rect
    }
}

fn draw_header(f: &mut Frame, theme: &Theme, area: Rect) {
    let header = Paragraph::new(Line::from(Span::styled(
        "GRATUITY",
        Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().style(Style::default().bg(theme.panel)));

    // Vertically centre the title in the bar
    f.render_widget(Block::default().style(Style::default().bg(theme.panel)), area);
    let middle = Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    };
    f.render_widget(header, middle);
}

fn draw_fields(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .spacing(2)
        .split(inset(area, 2));

    f.render_widget(
        components::text_field("Base", &app.base_input, app.field == Field::Base, &app.theme),
        chunks[0],
    );
    f.render_widget(
        components::text_field("Tax", &app.tax_input, app.field == Field::Tax, &app.theme),
        chunks[1],
    );
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(theme.highlight)))
    } else {
        let hint = match app.field {
            Field::Base => "Bill amount before tax and tip",
            Field::Tax => "Tax rate in percent",
            Field::Tip => "Tip rate in whole percent",
            Field::Split => "Number of people sharing the bill",
        };
        Line::from(Span::styled(hint, Style::default().fg(theme.text_dim)))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let key = |k: &'static str| {
        Span::styled(
            k,
            Style::default()
                .fg(theme.highlight)
                .add_modifier(Modifier::BOLD),
        )
    };
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(theme.text_dim));

    let mut spans = vec![key("Tab"), desc(" next  ")];
    if app.field.is_text() {
        spans.extend([key("Bksp"), desc(" delete  "), key("^U"), desc(" clear  ")]);
    } else {
        spans.extend([key("←/→"), desc(" adjust  "), key("q"), desc(" quit  ")]);
    }
    spans.extend([key("^R"), desc(" reset  "), key("F1"), desc(" help")]);

    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn draw_help_popup(f: &mut Frame, theme: &Theme) {
    let popup_area = centered_rect(60, 70, f.area());

    f.render_widget(Clear, popup_area);

    let heading = |t: &'static str| {
        Line::from(Span::styled(t, Style::default().fg(theme.glow).add_modifier(Modifier::BOLD)))
    };
    let entry = |k: &'static str, d: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<12}", k), Style::default().fg(theme.highlight)),
            Span::raw(d),
        ])
    };

    let help_text = vec![
        heading("═══ Navigation ═══"),
        entry("Tab/↓", "Next control"),
        entry("Shift-Tab/↑", "Previous control"),
        Line::from(""),
        heading("═══ Base & Tax ═══"),
        entry("0-9 .", "Type an amount"),
        entry("Backspace", "Delete last character"),
        entry("Ctrl-U", "Clear the field"),
        entry("", "Anything that isn't a number counts as 0"),
        Line::from(""),
        heading("═══ Tip & Split ═══"),
        entry("←/→ h/l", "Step down/up by one"),
        entry("Home/End", "Jump to the lowest/highest value"),
        Line::from(""),
        heading("═══ General ═══"),
        entry("Ctrl-R", "Reset all inputs"),
        entry("q", "Quit (on a slider)"),
        entry("Ctrl-C", "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(theme.text_dim)),
            Span::styled("Esc", Style::default().fg(theme.highlight)),
            Span::styled(" to close", Style::default().fg(theme.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::bordered()
                .title(Span::styled(" gratuity Help ", Style::default().fg(theme.highlight)))
                .border_style(Style::default().fg(theme.highlight))
                .style(Style::default().bg(theme.panel)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
