//! Terminal layout of the departure board.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Cell, Paragraph, Row, Table};

use super::view::{BoardView, DepartureRow};

const TITLE: &str = "GLEIS - LIVE DEPARTURES";
const PANEL_TITLE: &str = "DEPARTURES";
const EMPTY_TEXT: &str = "Scanning for connections...";

const BORDER: Style = Style::new().fg(Color::LightGreen);
const HEADER_TEXT: Style = Style::new().fg(Color::Magenta).add_modifier(Modifier::BOLD);
const CLOCK: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const LOCATION: Style = Style::new().fg(Color::LightYellow);
const PANEL_TITLE_TEXT: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const COLUMN_LINE: Style = Style::new().fg(Color::Cyan);
const COLUMN_DESTINATION: Style = Style::new().fg(Color::LightYellow);
const COLUMN_DEPARTURE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);
const DELAY_LATE: Style = Style::new().fg(Color::Red);
const DIM: Style = Style::new().fg(Color::Gray).add_modifier(Modifier::DIM);

/// Draw one frame.
pub fn draw(frame: &mut Frame, view: &BoardView) {
    let [header, info, main] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(frame.area());

    draw_header(frame, header);
    draw_info(frame, info, view);
    draw_departures(frame, main, view);
}

fn panel() -> Block<'static> {
    Block::bordered()
        .border_type(BorderType::Thick)
        .border_style(BORDER)
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::styled(TITLE, HEADER_TEXT))
        .alignment(Alignment::Center)
        .block(panel());
    frame.render_widget(title, area);
}

fn draw_info(frame: &mut Frame, area: Rect, view: &BoardView) {
    let line = Line::from(vec![
        Span::styled(view.clock.as_str(), CLOCK),
        Span::raw("  ::  "),
        Span::styled(view.location.as_str(), LOCATION),
    ]);
    let info = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(panel());
    frame.render_widget(info, area);
}

fn draw_departures(frame: &mut Frame, area: Rect, view: &BoardView) {
    let block = panel().title(Line::styled(PANEL_TITLE, PANEL_TITLE_TEXT));

    if view.is_empty() {
        let placeholder = Paragraph::new(Line::styled(EMPTY_TEXT, DIM))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let header = Row::new(["LINE", "DESTINATION", "DEPARTURE", "DELAY", "PLATFORM"])
        .style(HEADER_TEXT);
    let widths = [
        Constraint::Length(10),
        Constraint::Fill(1),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(8),
    ];

    let table = Table::new(view.rows.iter().map(departure_row), widths)
        .header(header)
        .block(block);
    frame.render_widget(table, area);
}

fn departure_row(row: &DepartureRow) -> Row<'_> {
    let delay_style = if row.delay_is_positive { DELAY_LATE } else { DIM };

    Row::new([
        Cell::from(row.line.as_str()).style(COLUMN_LINE),
        Cell::from(row.destination.as_str()).style(COLUMN_DESTINATION),
        Cell::from(row.time.as_str()).style(COLUMN_DEPARTURE),
        Cell::from(row.delay.as_str()).style(delay_style),
        Cell::from(row.platform.as_str()).style(DIM),
    ])
}
