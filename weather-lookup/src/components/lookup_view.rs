//! Root view: title, hint, search field, result, backdrop status, help.
//!
//! Key routing:
//! - Ctrl+C / Ctrl+Q quit from anywhere
//! - while a notice is open, it owns the keyboard
//! - Esc quits, Ctrl+T toggles units, Enter submits
//! - everything else edits the search field

use crossterm::event::{KeyCode, KeyModifiers};
use lookup_dispatch::EventKind;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{
    BackdropStrip, BackdropStripProps, Component, HelpBar, HelpBarProps, NoticeOverlay,
    NoticeOverlayProps, QueryInput, QueryInputProps, ResultPanel, ResultPanelProps, PLACEHOLDER,
};
use crate::action::Action;
use crate::state::AppState;
use crate::theme::Theme;

pub const TITLE: &str = "Weather Dashboard";
pub const HINT_PREFIX: &str = "Type in your";

pub struct LookupViewProps<'a> {
    pub state: &'a AppState,
    pub theme: &'a Theme,
}

#[derive(Default)]
pub struct LookupView {
    input: QueryInput,
}

impl LookupView {
    pub fn new() -> Self {
        Self::default()
    }

    fn input_props<'a>(state: &'a AppState, theme: &'a Theme) -> QueryInputProps<'a, Action> {
        QueryInputProps {
            value: &state.query,
            placeholder: PLACEHOLDER,
            is_focused: state.notice.is_none(),
            theme,
            on_change: Action::QueryChange,
            on_submit: |_| Action::WeatherFetch,
        }
    }
}

impl Component<Action> for LookupView {
    type Props<'a> = LookupViewProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };
        let state = props.state;

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            return vec![Action::Quit];
        }

        if let Some(notice) = &state.notice {
            let mut overlay = NoticeOverlay;
            return overlay
                .handle_event(
                    event,
                    NoticeOverlayProps {
                        notice,
                        theme: props.theme,
                    },
                )
                .into_iter()
                .collect();
        }

        match key.code {
            KeyCode::Esc => vec![Action::Quit],
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                vec![Action::UiToggleUnits]
            }
            _ => self
                .input
                .handle_event(event, Self::input_props(state, props.theme))
                .into_iter()
                .collect(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let theme = props.theme;

        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.brand))
            .title(Line::from(Span::styled(
                format!(" {} ", TITLE),
                Style::default().fg(theme.brand).bold(),
            )))
            .title_alignment(ratatui::layout::Alignment::Center);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let [hint_area, input_area, unit_area, result_area, backdrop_area, help_area] =
            Layout::vertical([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        let hint = format!(
            "{} {} Province (First Letter Must Be Capitalized)",
            HINT_PREFIX, state.settings.region.code
        );
        let hint = Line::from(Span::styled(hint, Style::default().fg(theme.muted))).centered();
        frame.render_widget(Paragraph::new(hint), hint_area);

        self.input
            .render(frame, input_area, Self::input_props(state, theme));

        let unit_line = Line::from(vec![
            Span::styled("Units: ", Style::default().fg(theme.muted)),
            Span::styled(
                format!(
                    "{} (° {}, {})",
                    state.unit,
                    state.unit.temperature_suffix(),
                    state.unit.speed_suffix()
                ),
                Style::default().fg(theme.accent),
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(unit_line), unit_area);

        ResultPanel.render(
            frame,
            result_area,
            ResultPanelProps {
                weather: state.weather.as_ref(),
                is_loading: state.is_loading,
                tick_count: state.tick_count,
                icon_base_url: &state.settings.icon_base_url,
                theme,
            },
        );

        BackdropStrip.render(
            frame,
            backdrop_area,
            BackdropStripProps {
                backdrop: &state.backdrop,
                theme,
            },
        );

        HelpBar.render(frame, help_area, HelpBarProps { theme });

        if let Some(notice) = &state.notice {
            NoticeOverlay.render(frame, area, NoticeOverlayProps { notice, theme });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::LookupError;
    use lookup_dispatch::testing::{char_key, ctrl_key, key, ActionAssertions};

    fn events(
        view: &mut LookupView,
        state: &AppState,
        event: crossterm::event::KeyEvent,
    ) -> Vec<Action> {
        let theme = Theme::default();
        view.handle_event(
            &EventKind::Key(event),
            LookupViewProps {
                state,
                theme: &theme,
            },
        )
        .into_iter()
        .collect()
    }

    #[test]
    fn test_typing_changes_query() {
        let mut view = LookupView::new();
        let state = AppState::default();
        events(&mut view, &state, char_key('G')).assert_first(Action::QueryChange("G".into()));
    }

    #[test]
    fn test_enter_fetches() {
        let mut view = LookupView::new();
        let mut state = AppState::default();
        state.query = "Gauteng".into();
        events(&mut view, &state, key("enter")).assert_first(Action::WeatherFetch);
    }

    #[test]
    fn test_ctrl_t_toggles_units() {
        let mut view = LookupView::new();
        let state = AppState::default();
        let actions = events(&mut view, &state, ctrl_key('t'));
        actions.assert_count(1);
        actions.assert_first(Action::UiToggleUnits);
    }

    #[test]
    fn test_esc_quits() {
        let mut view = LookupView::new();
        let state = AppState::default();
        events(&mut view, &state, key("esc")).assert_first(Action::Quit);
        events(&mut view, &state, ctrl_key('c')).assert_first(Action::Quit);
    }

    #[test]
    fn test_notice_captures_keys() {
        let mut view = LookupView::new();
        let mut state = AppState::default();
        state.notice = Some(LookupError::InvalidInput);

        events(&mut view, &state, key("esc")).assert_first(Action::NoticeDismiss);
        events(&mut view, &state, key("enter")).assert_first(Action::NoticeDismiss);
        events(&mut view, &state, char_key('a')).assert_empty();
        events(&mut view, &state, ctrl_key('q')).assert_first(Action::Quit);
    }

    #[test]
    fn test_non_key_events_ignored() {
        let mut view = LookupView::new();
        let state = AppState::default();
        let theme = Theme::default();
        let actions: Vec<Action> = view
            .handle_event(
                &EventKind::Resize(80, 24),
                LookupViewProps {
                    state: &state,
                    theme: &theme,
                },
            )
            .into_iter()
            .collect();
        actions.assert_empty();
    }
}
