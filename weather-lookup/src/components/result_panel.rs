use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::WeatherReport;
use crate::theme::Theme;

pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];
pub const EMPTY_TEXT: &str = "No data to display.";

pub struct ResultPanel;

pub struct ResultPanelProps<'a> {
    pub weather: Option<&'a WeatherReport>,
    pub is_loading: bool,
    pub tick_count: u32,
    pub icon_base_url: &'a str,
    pub theme: &'a Theme,
}

impl Component<Action> for ResultPanel {
    type Props<'a> = ResultPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = lines_for(&props);
        let height = lines.len() as u16;

        let [content] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);
        frame.render_widget(Paragraph::new(lines), content);
    }
}

enum PanelView<'a> {
    Loading,
    Ready(&'a WeatherReport),
    Empty,
}

impl<'a> PanelView<'a> {
    fn from_props(props: &ResultPanelProps<'a>) -> Self {
        // A result left over from before this fetch is hidden, not cleared
        if props.is_loading {
            PanelView::Loading
        } else if let Some(weather) = props.weather {
            PanelView::Ready(weather)
        } else {
            PanelView::Empty
        }
    }
}

fn lines_for(props: &ResultPanelProps<'_>) -> Vec<Line<'static>> {
    let theme = props.theme;

    match PanelView::from_props(props) {
        PanelView::Loading => {
            let spinner = SPINNERS[(props.tick_count as usize / 2) % SPINNERS.len()];
            let dots = ".".repeat((props.tick_count as usize / 3) % 4);
            vec![Line::from(vec![
                Span::styled(spinner, Style::default().fg(theme.accent)),
                Span::styled(
                    format!(" Fetching weather{:<3}", dots),
                    Style::default().fg(theme.muted),
                ),
            ])
            .centered()]
        }
        PanelView::Ready(weather) => vec![
            Line::from(vec![
                Span::raw(format!("{} ", condition_glyph(&weather.icon))),
                Span::styled(
                    weather.location_label(),
                    Style::default().fg(theme.text).bold(),
                ),
            ])
            .centered(),
            Line::from(""),
            Line::from(Span::styled(
                weather.temperature_label(),
                Style::default().fg(theme.brand).bold(),
            ))
            .centered(),
            Line::from(Span::styled(
                weather.description.clone(),
                Style::default().fg(theme.text),
            ))
            .centered(),
            Line::from(""),
            Line::from(Span::styled(
                weather.humidity_label(),
                Style::default().fg(theme.text),
            ))
            .centered(),
            Line::from(Span::styled(
                weather.wind_label(),
                Style::default().fg(theme.text),
            ))
            .centered(),
            Line::from(Span::styled(
                weather.icon_url(props.icon_base_url),
                Style::default().fg(theme.muted),
            ))
            .centered(),
        ],
        PanelView::Empty => vec![Line::from(Span::styled(
            EMPTY_TEXT,
            Style::default().fg(theme.muted),
        ))
        .centered()],
    }
}

/// Terminal stand-in for the provider's icon, keyed on its code (`01d`, `10n`..)
fn condition_glyph(icon: &str) -> &'static str {
    let night = icon.ends_with('n');
    match icon.get(..2) {
        Some("01") if night => "☾",
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") | Some("10") => "☂",
        Some("11") => "⚡",
        Some("13") => "❄",
        Some("50") => "≈",
        _ => "·",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_glyph() {
        assert_eq!(condition_glyph("01d"), "☀");
        assert_eq!(condition_glyph("01n"), "☾");
        assert_eq!(condition_glyph("10d"), "☂");
        assert_eq!(condition_glyph(""), "·");
    }
}
