use std::sync::Arc;

use chrono::{DateTime, Local};
use tokio::sync::mpsc;
use tracing::{debug, info};
use uuid::Uuid;

use super::state::{reduce, CheckerState, Effect, Event, Field, RequestState, Transition};
use crate::client::TradeScorer;
use crate::errors::TradeError;
use crate::models::{TradeInput, TradeResult};
use crate::notify::Notifier;

/// Outcome of a spawned scoring request.
#[derive(Debug)]
pub struct Completion {
    pub request_id: Uuid,
    pub outcome: Result<TradeResult, TradeError>,
    pub received_at: DateTime<Local>,
}

/// Owns the checker state and runs the effects the reducer asks for.
///
/// Requests run on spawned tasks and report back through a channel owned
/// by the checker, so a response that arrives after the checker is gone
/// is dropped instead of touching state.
pub struct TradeChecker<S, N> {
    state: CheckerState,
    scorer: Arc<S>,
    notifier: N,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S: TradeScorer, N: Notifier> TradeChecker<S, N> {
    pub fn new(scorer: Arc<S>, notifier: N) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: CheckerState::default(),
            scorer,
            notifier,
            completions_tx,
            completions_rx,
        }
    }

    pub fn state(&self) -> &CheckerState {
        &self.state
    }

    pub fn edit(&mut self, field: Field, value: String) {
        self.dispatch(Event::FieldChanged(field, value));
    }

    pub fn submit(&mut self) -> &RequestState {
        self.dispatch(Event::SubmitRequested {
            request_id: Uuid::new_v4(),
        });
        &self.state.request
    }

    pub fn dismiss(&mut self) {
        self.dispatch(Event::Dismissed);
    }

    pub async fn next_completion(&mut self) -> Option<Completion> {
        self.completions_rx.recv().await
    }

    pub fn complete(&mut self, completion: Completion) -> &RequestState {
        self.dispatch(Event::Completed {
            request_id: completion.request_id,
            outcome: completion.outcome,
            received_at: completion.received_at,
        });
        &self.state.request
    }

    /// Waits for the next response and applies it.
    #[cfg(test)]
    pub async fn settle(&mut self) -> &RequestState {
        if let Some(completion) = self.next_completion().await {
            self.complete(completion);
        }
        &self.state.request
    }

    fn dispatch(&mut self, event: Event) {
        let Transition { state, effect } = reduce(std::mem::take(&mut self.state), event);
        self.state = state;
        if let Some(effect) = effect {
            self.run(effect);
        }
    }

    fn run(&mut self, effect: Effect) {
        match effect {
            Effect::Fetch { request_id, input } => self.spawn_fetch(request_id, input),
            Effect::Reject { request_id, error } => {
                self.notifier.notify(error.into_notice(request_id));
            }
        }
    }

    fn spawn_fetch(&self, request_id: Uuid, input: TradeInput) {
        info!(
            %request_id,
            pokemon1 = %input.name1,
            pokemon2 = %input.name2,
            level1 = input.level1,
            level2 = input.level2,
            "🔍 Checking trade"
        );

        let scorer = Arc::clone(&self.scorer);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let outcome = scorer.score(&input).await;
            let completion = Completion {
                request_id,
                outcome,
                received_at: Local::now(),
            };
            if tx.send(completion).is_err() {
                debug!(%request_id, "Trade checker torn down, discarding response");
            }
        });
    }
}
