//! The event/action/render loop.
//!
//! 1. Terminal events are mapped to actions by the app's `map_event`
//! 2. Actions are dispatched to the store (through middleware)
//! 3. Effects returned by the reducer go to the app's effect handler,
//!    which spawns work on the [`TaskManager`]
//! 4. If state changed, the view is re-rendered inside the [`FaultBoundary`]

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::boundary::FaultBoundary;
use crate::effect::{EffectReducer, EffectStoreWithMiddleware, Middleware, NoopMiddleware};
use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::subscriptions::Subscriptions;
use crate::tasks::TaskManager;
use crate::Action;

/// Timeout passed to each `crossterm::event::poll` call.
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Sleep between poll cycles.
const POLL_LOOP_SLEEP: Duration = Duration::from_millis(16);

/// Result of mapping an event into actions plus an optional render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    /// Collect a component's `handle_event` output.
    pub fn from_actions(iter: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: iter.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn with_render(mut self) -> Self {
        self.needs_render = true;
        self
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

/// Context passed to effect handlers.
///
/// Effects only start work; results come back as actions from the tasks.
pub struct EffectContext<'a, A: Action> {
    tasks: &'a mut TaskManager<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }
}

/// Runtime for effect-based stores.
pub struct EffectRuntime<S, A: Action, E, M: Middleware<A> = NoopMiddleware> {
    store: EffectStoreWithMiddleware<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    boundary: FaultBoundary,
    should_render: bool,
    tasks: TaskManager<A>,
    subscriptions: Subscriptions<A>,
}

impl<S: 'static, A: Action, E> EffectRuntime<S, A, E, NoopMiddleware> {
    /// Create a runtime from state + effect reducer.
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self::from_store(EffectStoreWithMiddleware::new(
            state,
            reducer,
            NoopMiddleware,
        ))
    }
}

impl<S: 'static, A: Action, E, M: Middleware<A>> EffectRuntime<S, A, E, M> {
    pub fn from_store(store: EffectStoreWithMiddleware<S, A, E, M>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let tasks = TaskManager::new(action_tx.clone());
        let subscriptions = Subscriptions::new(action_tx.clone());

        Self {
            store,
            action_tx,
            action_rx,
            boundary: FaultBoundary::default(),
            should_render: true,
            tasks,
            subscriptions,
        }
    }

    /// Replace the default fault boundary (e.g. to change its message).
    pub fn with_boundary(mut self, boundary: FaultBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        let _ = self.action_tx.send(action);
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        &mut self.subscriptions
    }

    /// Dispatch one action and run its effects. Returns whether state changed.
    pub fn process<FEffect>(&mut self, action: A, handle_effect: &mut FEffect) -> bool
    where
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let result = self.store.dispatch(action);
        if result.has_effects() {
            let mut ctx = EffectContext {
                tasks: &mut self.tasks,
            };
            for effect in result.effects {
                handle_effect(effect, &mut ctx);
            }
        }
        result.changed
    }

    /// Wait for the next queued action (task results included).
    pub async fn next_action(&mut self) -> Option<A> {
        self.action_rx.recv().await
    }

    /// Run the event/action loop until `should_quit` accepts an action.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> EventOutcome<A>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let cancel_token = CancellationToken::new();
        let _handle = spawn_event_poller(
            event_tx,
            POLL_TIMEOUT,
            POLL_LOOP_SLEEP,
            cancel_token.clone(),
        );

        loop {
            if self.should_render {
                let state = self.store.state();
                let boundary = &mut self.boundary;
                terminal.draw(|frame| {
                    boundary.render(frame, frame.area(), |f, area| {
                        render(f, area, state);
                    });
                })?;
                self.should_render = false;
            }

            tokio::select! {
                Some(raw_event) = event_rx.recv() => {
                    let event = process_raw_event(raw_event);

                    // A degraded view only accepts the way out
                    if self.boundary.is_degraded() && !event.is_global() {
                        continue;
                    }

                    let outcome = map_event(&event, self.store.state());
                    if outcome.needs_render {
                        self.should_render = true;
                    }
                    for action in outcome.actions {
                        let _ = self.action_tx.send(action);
                    }
                }

                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        break;
                    }
                    if self.process(action, &mut handle_effect) {
                        self.should_render = true;
                    }
                }

                else => {
                    break;
                }
            }
        }

        cancel_token.cancel();
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::DispatchResult;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Ping,
        DidPong(u32),
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Ping => "Ping",
                TestAction::DidPong(_) => "DidPong",
            }
        }
    }

    #[derive(Debug)]
    enum TestEffect {
        Pong,
    }

    #[derive(Default)]
    struct TestState {
        pongs: u32,
    }

    fn reducer(state: &mut TestState, action: TestAction) -> DispatchResult<TestEffect> {
        match action {
            TestAction::Ping => DispatchResult::effect(TestEffect::Pong),
            TestAction::DidPong(n) => {
                state.pongs += n;
                DispatchResult::changed()
            }
        }
    }

    #[test]
    fn test_event_outcome_from_actions() {
        let outcome = EventOutcome::from_actions(Some(TestAction::Ping));
        assert_eq!(outcome.actions, vec![TestAction::Ping]);
        assert!(!outcome.needs_render);

        let outcome = EventOutcome::<TestAction>::from_actions(None);
        assert!(outcome.actions.is_empty());

        let outcome = EventOutcome::<TestAction>::ignored().with_render();
        assert!(outcome.needs_render);
        assert!(outcome.actions.is_empty());
    }

    #[tokio::test]
    async fn test_process_runs_effects_through_tasks() {
        fn handle_effect(effect: TestEffect, ctx: &mut EffectContext<TestAction>) {
            match effect {
                TestEffect::Pong => {
                    ctx.tasks().spawn("pong", async { TestAction::DidPong(3) });
                }
            }
        }

        let mut handle_effect = handle_effect;
        let mut runtime = EffectRuntime::new(TestState::default(), reducer);
        let changed = runtime.process(TestAction::Ping, &mut handle_effect);
        assert!(!changed);

        let action = tokio::time::timeout(Duration::from_millis(200), runtime.next_action())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(action, TestAction::DidPong(3));

        assert!(runtime.process(action, &mut handle_effect));
        assert_eq!(runtime.state().pongs, 3);
    }

    #[tokio::test]
    async fn test_enqueue_reaches_queue() {
        let mut runtime = EffectRuntime::new(TestState::default(), reducer);
        runtime.enqueue(TestAction::Ping);
        let action = tokio::time::timeout(Duration::from_millis(100), runtime.next_action())
            .await
            .expect("timeout");
        assert_eq!(action, Some(TestAction::Ping));
    }
}
