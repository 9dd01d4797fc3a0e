//! Render-time fault containment
//!
//! [`FaultBoundary`] supervises the root render call. A panic raised while
//! rendering is caught, logged, and flips the boundary into
//! [`BoundaryState::Degraded`]. From then on only the static fallback message
//! is drawn; the boundary never returns to `Healthy`.

use std::panic::{self, AssertUnwindSafe};

use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use crate::tasks::panic_message;

/// Message shown once the view has degraded, unless overridden.
pub const DEFAULT_FALLBACK: &str = "Something went wrong. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryState {
    Healthy,
    /// Terminal. `reason` is the panic message that caused it.
    Degraded { reason: String },
}

#[derive(Debug, Clone)]
pub struct FaultBoundary {
    state: BoundaryState,
    fallback_message: String,
    fallback_color: Color,
}

impl Default for FaultBoundary {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK)
    }
}

impl FaultBoundary {
    pub fn new(fallback_message: impl Into<String>) -> Self {
        Self {
            state: BoundaryState::Healthy,
            fallback_message: fallback_message.into(),
            fallback_color: Color::Red,
        }
    }

    pub fn with_fallback_color(mut self, color: Color) -> Self {
        self.fallback_color = color;
        self
    }

    pub fn state(&self) -> &BoundaryState {
        &self.state
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.state, BoundaryState::Degraded { .. })
    }

    /// Run `render` inside the boundary.
    ///
    /// Once degraded, `render` is never called again.
    pub fn render<F>(&mut self, frame: &mut Frame, area: Rect, render: F)
    where
        F: FnOnce(&mut Frame, Rect),
    {
        if self.is_degraded() {
            self.render_fallback(frame, area);
            return;
        }

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| render(&mut *frame, area)));
        if let Err(payload) = outcome {
            let reason = panic_message(payload.as_ref());
            tracing::error!(%reason, "Render fault, switching to degraded view");
            self.state = BoundaryState::Degraded { reason };
            self.render_fallback(frame, area);
        }
    }

    fn render_fallback(&self, frame: &mut Frame, area: Rect) {
        // Whatever the failed render left behind is discarded
        frame.render_widget(Clear, area);

        let [line_area] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::Center)
            .areas(area);
        let message = Paragraph::new(self.fallback_message.as_str())
            .style(Style::default().fg(self.fallback_color).bold())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(message, line_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RenderHarness;

    #[test]
    fn test_healthy_render_passes_through() {
        let mut harness = RenderHarness::new(60, 10);
        let mut boundary = FaultBoundary::default();

        let output = harness.render_to_string_plain(|frame| {
            boundary.render(frame, frame.area(), |f, area| {
                f.render_widget(Paragraph::new("all good"), area);
            });
        });

        assert!(output.contains("all good"));
        assert_eq!(boundary.state(), &BoundaryState::Healthy);
    }

    #[test]
    fn test_panic_degrades_permanently() {
        let mut harness = RenderHarness::new(60, 10);
        let mut boundary = FaultBoundary::default();

        let output = harness.render_to_string_plain(|frame| {
            boundary.render(frame, frame.area(), |_, _| panic!("bad layout"));
        });
        assert!(output.contains("Something went wrong"));
        assert_eq!(
            boundary.state(),
            &BoundaryState::Degraded {
                reason: "bad layout".into()
            }
        );

        // A later healthy render is not attempted
        let mut called = false;
        let output = harness.render_to_string_plain(|frame| {
            boundary.render(frame, frame.area(), |f, area| {
                called = true;
                f.render_widget(Paragraph::new("recovered"), area);
            });
        });
        assert!(!called);
        assert!(!output.contains("recovered"));
        assert!(output.contains("Something went wrong"));
    }

    #[test]
    fn test_custom_fallback_message() {
        let mut harness = RenderHarness::new(40, 6);
        let mut boundary = FaultBoundary::new("offline");

        let output = harness.render_to_string_plain(|frame| {
            boundary.render(frame, frame.area(), |_, _| panic!("x"));
        });
        assert!(output.contains("offline"));
    }
}
