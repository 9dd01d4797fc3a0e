//! Dismissable notice drawn over the dimmed view

use crossterm::event::KeyCode;
use lookup_dispatch::EventKind;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::lookup::LookupError;
use crate::theme::Theme;

const NOTICE_WIDTH: u16 = 56;
const NOTICE_HEIGHT: u16 = 7;

pub struct NoticeOverlay;

pub struct NoticeOverlayProps<'a> {
    pub notice: &'a LookupError,
    pub theme: &'a Theme,
}

impl Component<Action> for NoticeOverlay {
    type Props<'a> = NoticeOverlayProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Key(key)
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) =>
            {
                Some(Action::NoticeDismiss)
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let theme = props.theme;
        dim(frame.buffer_mut(), area);

        let modal = centered_rect(NOTICE_WIDTH, NOTICE_HEIGHT, area);
        frame.render_widget(Clear, modal);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", props.notice.title()))
            .border_style(Style::default().fg(theme.brand))
            .style(Style::default().bg(theme.surface));

        let body = vec![
            Line::from(""),
            Line::from(Span::styled(
                props.notice.to_string(),
                Style::default().fg(theme.text).bold(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("enter", Style::default().fg(theme.accent).bold()),
                Span::styled(" dismiss", Style::default().fg(theme.muted)),
            ]),
        ];

        frame.render_widget(
            Paragraph::new(body)
                .block(block)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            modal,
        );
    }
}

/// Calculate a centered rectangle within an area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn dim(buf: &mut Buffer, area: Rect) {
    let area = area.intersection(buf.area);
    for y in area.y..area.y.saturating_add(area.height) {
        for x in area.x..area.x.saturating_add(area.width) {
            let cell = &mut buf[(x, y)];
            let style = cell.style().add_modifier(Modifier::DIM);
            cell.set_style(style);
        }
    }
}
