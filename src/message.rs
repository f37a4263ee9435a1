use chrono::NaiveDateTime;

use crate::core::reminder::ReminderTicket;

#[derive(Debug, Clone)]
pub enum Message {
    // Creation input
    TodoInputChanged(String),
    TodoSubmit,

    // Inline editing (all row actions carry the list position)
    EditTodo(usize),
    EditInputChanged(String),
    SaveEdit(usize),

    // Deletion
    DeleteTodo(usize),

    // Reminder form
    OpenReminderForm(usize),
    CancelReminderForm,
    ReminderDateChanged(String),
    ReminderTimeChanged(String),
    ReminderPreset(NaiveDateTime),
    SubmitReminder,

    // Fired reminders
    ReminderFired(ReminderTicket),
    DismissAlert,

    // Header
    ToggleClockFormat,
}
