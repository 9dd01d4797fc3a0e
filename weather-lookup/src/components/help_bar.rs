use ratatui::{
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::theme::Theme;

const BINDINGS: [(&str, &str); 3] = [("enter", "fetch"), ("ctrl+t", "units"), ("esc", "quit")];

pub struct HelpBar;

pub struct HelpBarProps<'a> {
    pub theme: &'a Theme,
}

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let key_style = Style::default().fg(props.theme.accent).bold();
        let label_style = Style::default().fg(props.theme.muted);

        let spans: Vec<Span> = BINDINGS
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(*key, key_style),
                    Span::styled(format!(" {}  ", label), label_style),
                ]
            })
            .collect();

        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
