mod terminal;
mod view;

pub use terminal::TerminalApp;

use crate::checker::Field;

/// Which control has keyboard focus: one of the four inputs or the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Name1,
    Level1,
    Name2,
    Level2,
    Submit,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Name1,
        Focus::Level1,
        Focus::Name2,
        Focus::Level2,
        Focus::Submit,
    ];

    pub fn field(self) -> Option<Field> {
        match self {
            Focus::Name1 => Some(Field::Name1),
            Focus::Level1 => Some(Field::Level1),
            Focus::Name2 => Some(Field::Name2),
            Focus::Level2 => Some(Field::Level2),
            Focus::Submit => None,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}
