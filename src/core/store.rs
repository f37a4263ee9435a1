use chrono::NaiveDateTime;
use thiserror::Error;
use uuid::Uuid;

use super::item::{Reminder, ReminderState, TodoItem};
use super::reminder::ReminderTicket;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("input is empty after trimming")]
    EmptyInput,
    #[error("no todo at position {0}")]
    OutOfRange(usize),
}

/// In-progress edit of one item's text. Keyed by id so the session survives
/// positions shifting underneath it.
#[derive(Debug, Clone)]
struct EditSession {
    item: Uuid,
    buffer: String,
}

/// The list of todos plus the at-most-one active edit session. All callers go
/// through list positions; only the session tracks identity.
#[derive(Debug, Default)]
pub struct TodoStore {
    items: Vec<TodoItem>,
    editing: Option<EditSession>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    /// Current position of the item with this id, while it is still listed.
    pub fn position_of(&self, id: Uuid) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn find(&self, id: Uuid) -> Option<&TodoItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Append a new item at the tail. Whitespace-only input is rejected.
    pub fn add(&mut self, text: &str) -> Result<(), StoreError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(StoreError::EmptyInput);
        }
        self.items.push(TodoItem::new(text));
        Ok(())
    }

    /// Start editing the item at `index`, seeding the buffer with its current
    /// text. Any unsaved buffer for another item is abandoned.
    pub fn begin_edit(&mut self, index: usize) -> Result<(), StoreError> {
        let item = self.items.get(index).ok_or(StoreError::OutOfRange(index))?;
        self.editing = Some(EditSession {
            item: item.id,
            buffer: item.text.clone(),
        });
        Ok(())
    }

    /// Replace the in-progress buffer. Does nothing when no edit is active.
    pub fn update_edit_buffer(&mut self, text: impl Into<String>) {
        if let Some(session) = self.editing.as_mut() {
            session.buffer = text.into();
        }
    }

    /// Commit the buffer to the item at `index`. The session ends either way;
    /// text and the `updated` stamp change only when the trimmed buffer is
    /// non-empty and differs from the current text. Returns whether a change
    /// was applied.
    pub fn commit_edit(&mut self, index: usize) -> Result<bool, StoreError> {
        let Some(session) = self.editing.take() else {
            return Ok(false);
        };
        let item = self
            .items
            .get_mut(index)
            .ok_or(StoreError::OutOfRange(index))?;
        if item.id != session.item {
            // The list shifted under the session; leave this item alone.
            return Ok(false);
        }
        let text = session.buffer.trim();
        if text.is_empty() || text == item.text {
            return Ok(false);
        }
        item.text = text.to_string();
        item.updated = chrono::Local::now().naive_local();
        Ok(true)
    }

    /// Remove and return the item at `index`. Later items shift down by one.
    /// A session editing the removed item is dropped; a reminder timer armed
    /// for it is not cancelled.
    pub fn delete(&mut self, index: usize) -> Result<TodoItem, StoreError> {
        if index >= self.items.len() {
            return Err(StoreError::OutOfRange(index));
        }
        let item = self.items.remove(index);
        if self.editing.as_ref().is_some_and(|s| s.item == item.id) {
            self.editing = None;
        }
        Ok(item)
    }

    /// Set or replace the reminder on the item at `index` and hand back a
    /// ticket for the scheduler. Replacing does not cancel a timer already
    /// armed for the previous instant.
    pub fn set_reminder(
        &mut self,
        index: usize,
        due: NaiveDateTime,
    ) -> Result<ReminderTicket, StoreError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(StoreError::OutOfRange(index))?;
        item.reminder = Some(Reminder::scheduled(due));
        Ok(ReminderTicket::new(item, due))
    }

    /// Flip the reminder to fired, but only while the delivered ticket still
    /// matches the item's current reminder. A newer reminder set after this
    /// ticket was armed keeps its own state.
    pub fn mark_fired(&mut self, ticket: &ReminderTicket) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == ticket.item) {
            if let Some(reminder) = item.reminder.as_mut() {
                if reminder.due == ticket.due && !reminder.is_fired() {
                    reminder.state = ReminderState::Fired;
                }
            }
        }
    }

    /// Text for the alert: the item's current text, falling back to the
    /// ticket's snapshot when the item was deleted after the reminder was
    /// armed. Deletion never suppresses the alert itself.
    pub fn notification_text(&self, ticket: &ReminderTicket) -> String {
        self.find(ticket.item)
            .map(|i| i.text.clone())
            .unwrap_or_else(|| ticket.text.clone())
    }

    /// Position of the item currently in edit mode, if any.
    pub fn editing_index(&self) -> Option<usize> {
        let session = self.editing.as_ref()?;
        self.position_of(session.item)
    }

    pub fn edit_buffer(&self) -> &str {
        self.editing
            .as_ref()
            .map(|s| s.buffer.as_str())
            .unwrap_or("")
    }
}
