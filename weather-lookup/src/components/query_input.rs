//! Single-line search field

use crossterm::event::{KeyCode, KeyModifiers};
use lookup_dispatch::EventKind;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::theme::Theme;

pub const PLACEHOLDER: &str = "Enter Province Name";

pub struct QueryInputProps<'a, A> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub is_focused: bool,
    pub theme: &'a Theme,
    /// Called with the full new value on every edit
    pub on_change: fn(String) -> A,
    /// Called on Enter
    pub on_submit: fn(String) -> A,
}

/// Text field with a cursor
///
/// The value is owned by the app state; only the cursor lives here.
#[derive(Default)]
pub struct QueryInput {
    /// Byte offset into the value, always on a char boundary
    cursor: usize,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
        while !value.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    fn move_left(&mut self, value: &str) {
        if let Some((i, _)) = value[..self.cursor].char_indices().next_back() {
            self.cursor = i;
        }
    }

    fn move_right(&mut self, value: &str) {
        if let Some(c) = value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..self.cursor]);
        next.push(c);
        next.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        next
    }

    fn backspace(&mut self, value: &str) -> Option<String> {
        let (start, _) = value[..self.cursor].char_indices().next_back()?;
        let mut next = String::with_capacity(value.len());
        next.push_str(&value[..start]);
        next.push_str(&value[self.cursor..]);
        self.cursor = start;
        Some(next)
    }

    fn delete(&self, value: &str) -> Option<String> {
        let c = value[self.cursor..].chars().next()?;
        let mut next = String::with_capacity(value.len());
        next.push_str(&value[..self.cursor]);
        next.push_str(&value[self.cursor + c.len_utf8()..]);
        Some(next)
    }
}

impl<A> Component<A> for QueryInput {
    type Props<'a> = QueryInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        self.clamp_cursor(props.value);

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = props.value.len();
                    None
                }
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_change)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some((props.on_change)(self.insert(props.value, c))),
            KeyCode::Backspace => self.backspace(props.value).map(props.on_change),
            KeyCode::Delete => self.delete(props.value).map(props.on_change),
            KeyCode::Left => {
                self.move_left(props.value);
                None
            }
            KeyCode::Right => {
                self.move_right(props.value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.value.len();
                None
            }
            KeyCode::Enter => Some((props.on_submit)(props.value.to_string())),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.value);
        let theme = props.theme;

        let (text, style) = if props.value.is_empty() {
            (props.placeholder, Style::default().fg(theme.muted))
        } else {
            (props.value, Style::default().fg(theme.text))
        };

        let border = if props.is_focused {
            theme.brand
        } else {
            theme.muted
        };

        let paragraph = Paragraph::new(text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(paragraph, area);

        if props.is_focused && area.width > 2 && area.height > 2 {
            let column = cursor_column(&props.value[..self.cursor]);
            let x = area.x.saturating_add(1).saturating_add(column);
            if x < area.right().saturating_sub(1) {
                frame.set_cursor_position((x, area.y + 1));
            }
        }
    }
}

/// Screen column of a cursor placed after `before`, clamped to `u16::MAX`.
fn cursor_column(before: &str) -> u16 {
    u16::try_from(before.chars().count()).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lookup_dispatch::testing::{char_key, key, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Change(String),
        Submit(String),
    }

    fn props<'a>(value: &'a str, theme: &'a Theme) -> QueryInputProps<'a, TestAction> {
        QueryInputProps {
            value,
            placeholder: PLACEHOLDER,
            is_focused: true,
            theme,
            on_change: TestAction::Change,
            on_submit: TestAction::Submit,
        }
    }

    fn send(
        input: &mut QueryInput,
        value: &str,
        event: crossterm::event::KeyEvent,
    ) -> Vec<TestAction> {
        let theme = Theme::default();
        input
            .handle_event(&EventKind::Key(event), props(value, &theme))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_typing_keeps_case() {
        let mut input = QueryInput::new();
        let actions = send(&mut input, "", char_key('G'));
        assert_eq!(actions, vec![TestAction::Change("G".into())]);
    }

    #[test]
    fn test_typing_at_cursor() {
        let mut input = QueryInput::new();
        input.cursor = 3;
        let actions = send(&mut input, "Gaung", char_key('t'));
        assert_eq!(actions, vec![TestAction::Change("Gauntg".into())]);
    }

    #[test]
    fn test_backspace_multibyte() {
        let mut input = QueryInput::new();
        input.cursor = "Kwé".len();
        let actions = send(&mut input, "Kwé", key("backspace"));
        assert_eq!(actions, vec![TestAction::Change("Kw".into())]);
        assert_eq!(input.cursor, 2);
    }

    #[test]
    fn test_backspace_at_start() {
        let mut input = QueryInput::new();
        assert!(send(&mut input, "abc", key("backspace")).is_empty());
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = QueryInput::new();
        let actions = send(&mut input, "xGauteng", key("delete"));
        assert_eq!(actions, vec![TestAction::Change("Gauteng".into())]);
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut input = QueryInput::new();
        input.cursor = 4;
        let actions = send(&mut input, "Cape", key("ctrl+u"));
        assert_eq!(actions, vec![TestAction::Change(String::new())]);
    }

    #[test]
    fn test_enter_submits_value() {
        let mut input = QueryInput::new();
        let actions = send(&mut input, "Gauteng", key("enter"));
        assert_eq!(actions, vec![TestAction::Submit("Gauteng".into())]);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut input = QueryInput::new();
        let theme = Theme::default();
        let mut p = props("", &theme);
        p.is_focused = false;
        let actions: Vec<_> = input
            .handle_event(&EventKind::Key(char_key('a')), p)
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_cursor_clamped_after_external_change() {
        let mut input = QueryInput::new();
        input.cursor = 10;
        let actions = send(&mut input, "ab", char_key('c'));
        assert_eq!(actions, vec![TestAction::Change("abc".into())]);
    }

    #[test]
    fn test_render_placeholder() {
        let mut harness = RenderHarness::new(30, 3);
        let mut input = QueryInput::new();
        let theme = Theme::default();
        let output = harness.render_to_string_plain(|frame| {
            input.render(frame, frame.area(), props("", &theme));
        });
        assert!(output.contains(PLACEHOLDER));
    }

    #[test]
    fn test_cursor_column_saturates() {
        assert_eq!(cursor_column("Gauteng"), 7);
        assert_eq!(cursor_column("Kwé"), 3);
        assert_eq!(cursor_column(&"a".repeat(70_000)), u16::MAX);
    }

    #[test]
    fn test_render_very_long_query_at_edge() {
        let mut harness = RenderHarness::new(30, 3);
        let mut input = QueryInput::new();
        let theme = Theme::default();
        let value = "a".repeat(70_000);
        input.cursor = value.len();
        let output = harness.render_to_string_plain(|frame| {
            let area = frame.area();
            let area = Rect::new(area.right() - 10, area.y, 10, area.height);
            input.render(frame, area, props(&value, &theme));
        });
        assert!(output.contains("aaaa"));
    }
}
