use chrono::NaiveDateTime;
use uuid::Uuid;

/// Lifecycle of a single reminder value. An item without a reminder has no
/// state at all (`reminder: None`); once fired there is no way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    Scheduled,
    Fired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reminder {
    pub due: NaiveDateTime,
    pub state: ReminderState,
}

impl Reminder {
    pub fn scheduled(due: NaiveDateTime) -> Self {
        Self {
            due,
            state: ReminderState::Scheduled,
        }
    }

    pub fn is_fired(&self) -> bool {
        self.state == ReminderState::Fired
    }
}

#[derive(Debug, Clone)]
pub struct TodoItem {
    pub id: Uuid,
    pub text: String,
    /// Creation time, overwritten whenever the text actually changes.
    pub updated: NaiveDateTime,
    pub reminder: Option<Reminder>,
}

impl TodoItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            updated: chrono::Local::now().naive_local(),
            reminder: None,
        }
    }
}
