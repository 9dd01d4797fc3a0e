//! One-line status of the background playlist

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::backdrop::{Backdrop, BackdropStatus};
use crate::theme::Theme;

pub struct BackdropStrip;

pub struct BackdropStripProps<'a> {
    pub backdrop: &'a Backdrop,
    pub theme: &'a Theme,
}

impl Component<Action> for BackdropStrip {
    type Props<'a> = BackdropStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let theme = props.theme;
        let playlist = &props.backdrop.playlist;

        let (glyph, color) = match props.backdrop.status {
            BackdropStatus::Loading => ("…", theme.muted),
            BackdropStatus::Playing => ("▶", theme.accent),
            BackdropStatus::Stalled { .. } => ("■", theme.error),
        };

        let line = Line::from(vec![
            Span::styled(format!("{} ", glyph), Style::default().fg(color)),
            Span::styled(
                format!(
                    "{} {}/{} ",
                    playlist.current().label(),
                    playlist.index() + 1,
                    playlist.len()
                ),
                Style::default().fg(theme.muted),
            ),
            Span::styled(props.backdrop.status.to_string(), Style::default().fg(color)),
        ])
        .right_aligned();

        frame.render_widget(Paragraph::new(line), area);
    }
}
