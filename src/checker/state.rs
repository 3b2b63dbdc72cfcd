//! Trade checker state and its pure reducer.
//!
//! The reducer never performs I/O. Anything with a side effect (issuing the
//! request, raising an alert) comes back as an [`Effect`] for the controller
//! to run.

use chrono::{DateTime, Local};
use uuid::Uuid;
use validator::Validate;

use crate::errors::{TradeError, MISSING_NAMES};
use crate::models::{TradeInput, TradeResult, LEVEL_MIN};

/// Number widgets take at most this many digits.
const LEVEL_DIGITS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name1,
    Level1,
    Name2,
    Level2,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name1, Field::Level1, Field::Name2, Field::Level2];

    pub fn is_level(self) -> bool {
        matches!(self, Field::Level1 | Field::Level2)
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Name1 => "Pokémon 1",
            Field::Name2 => "Pokémon 2",
            Field::Level1 | Field::Level2 => "Level",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name1 => "Enter first Pokémon (e.g., Charizard)",
            Field::Name2 => "Enter second Pokémon (e.g., Blastoise)",
            Field::Level1 | Field::Level2 => "Level",
        }
    }
}

/// Raw text behind the four inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeForm {
    pub name1: String,
    pub level1: String,
    pub name2: String,
    pub level2: String,
}

impl Default for TradeForm {
    fn default() -> Self {
        Self {
            name1: String::new(),
            level1: LEVEL_MIN.to_string(),
            name2: String::new(),
            level2: LEVEL_MIN.to_string(),
        }
    }
}

impl TradeForm {
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::Name1 => &self.name1,
            Field::Level1 => &self.level1,
            Field::Name2 => &self.name2,
            Field::Level2 => &self.level2,
        }
    }

    fn value_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name1 => &mut self.name1,
            Field::Level1 => &mut self.level1,
            Field::Name2 => &mut self.name2,
            Field::Level2 => &mut self.level2,
        }
    }

    /// Replaces a field's text. Level fields only take up to three digits;
    /// anything else is refused and the old value kept.
    pub fn set(&mut self, field: Field, value: String) -> bool {
        if field.is_level()
            && (value.len() > LEVEL_DIGITS || !value.chars().all(|c| c.is_ascii_digit()))
        {
            return false;
        }
        *self.value_mut(field) = value;
        true
    }

    pub fn to_input(&self) -> TradeInput {
        TradeInput {
            name1: self.name1.trim().to_string(),
            name2: self.name2.trim().to_string(),
            level1: parse_level(&self.level1),
            level2: parse_level(&self.level2),
        }
    }
}

// An empty number widget falls back to its minimum
fn parse_level(text: &str) -> u32 {
    text.parse().unwrap_or(LEVEL_MIN)
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Loading {
        request_id: Uuid,
    },
    Succeeded {
        result: TradeResult,
        received_at: DateTime<Local>,
    },
    Failed,
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading { .. })
    }

    pub fn result(&self) -> Option<&TradeResult> {
        match self {
            RequestState::Succeeded { result, .. } => Some(result),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckerState {
    pub form: TradeForm,
    pub request: RequestState,
}

#[derive(Debug)]
pub enum Event {
    FieldChanged(Field, String),
    SubmitRequested {
        request_id: Uuid,
    },
    Completed {
        request_id: Uuid,
        outcome: Result<TradeResult, TradeError>,
        received_at: DateTime<Local>,
    },
    /// The user acknowledged a failure alert.
    Dismissed,
}

#[derive(Debug)]
pub enum Effect {
    Fetch {
        request_id: Uuid,
        input: TradeInput,
    },
    Reject {
        request_id: Option<Uuid>,
        error: TradeError,
    },
}

#[derive(Debug)]
pub struct Transition {
    pub state: CheckerState,
    pub effect: Option<Effect>,
}

impl Transition {
    fn stay(state: CheckerState) -> Self {
        Self { state, effect: None }
    }
}

pub fn reduce(mut state: CheckerState, event: Event) -> Transition {
    match event {
        Event::FieldChanged(field, value) => {
            state.form.set(field, value);
            Transition::stay(state)
        }
        Event::SubmitRequested { request_id } => {
            // Submit control is disabled while a request is in flight
            if state.request.is_loading() {
                return Transition::stay(state);
            }

            let input = state.form.to_input();
            if input.validate().is_err() {
                return Transition {
                    state,
                    effect: Some(Effect::Reject {
                        request_id: None,
                        error: TradeError::Validation(MISSING_NAMES.to_string()),
                    }),
                };
            }

            state.request = RequestState::Loading { request_id };
            Transition {
                state,
                effect: Some(Effect::Fetch { request_id, input }),
            }
        }
        Event::Completed {
            request_id,
            outcome,
            received_at,
        } => {
            let current = match state.request {
                RequestState::Loading { request_id: current } => current,
                _ => return Transition::stay(state),
            };
            if current != request_id {
                return Transition::stay(state);
            }

            match outcome {
                Ok(result) => {
                    state.request = RequestState::Succeeded {
                        result,
                        received_at,
                    };
                    Transition::stay(state)
                }
                Err(error) => {
                    state.request = RequestState::Failed;
                    Transition {
                        state,
                        effect: Some(Effect::Reject {
                            request_id: Some(request_id),
                            error,
                        }),
                    }
                }
            }
        }
        Event::Dismissed => {
            if state.request == RequestState::Failed {
                state.request = RequestState::Idle;
            }
            Transition::stay(state)
        }
    }
}
