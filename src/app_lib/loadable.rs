//! Load state shared by every list-owning workflow, plus the generation
//! counter used to drop completions that arrive after a reload or teardown.

use super::errors::AppError;

/// Remote data as seen by one workflow instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Loadable<T> {
    #[default]
    NotLoaded,
    Loading,
    Loaded(T),
    /// The fetch failed; the view shows the error instead of stale data.
    Failed(AppError),
}

impl<T> Loadable<T> {
    /// Settles a single fetch into `Loaded` or `Failed`.
    pub fn from_result(result: Result<T, AppError>) -> Self {
        match result {
            Ok(value) => Self::Loaded(value),
            Err(err) => Self::Failed(err),
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    pub fn value_mut(&mut self) -> Option<&mut T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// Message of a failed fetch, ready for display.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.failure().map(AppError::message)
    }

    #[must_use]
    pub const fn failure(&self) -> Option<&AppError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Identifies the generation a request was issued under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

/// Generation counter with a teardown flag.
#[derive(Debug, Default)]
pub struct Lifecycle {
    generation: u64,
    torn_down: bool,
}

impl Lifecycle {
    /// Starts a new generation; tickets from earlier generations go stale.
    pub fn advance(&mut self) -> Ticket {
        self.generation = self.generation.wrapping_add(1);
        self.current()
    }

    #[must_use]
    pub const fn current(&self) -> Ticket {
        Ticket {
            generation: self.generation,
        }
    }

    /// A completion may touch state only if this returns true.
    #[must_use]
    pub const fn accepts(&self, ticket: Ticket) -> bool {
        !self.torn_down && ticket.generation == self.generation
    }

    pub fn teardown(&mut self) {
        self.torn_down = true;
    }
}
