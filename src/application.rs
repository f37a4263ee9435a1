use std::collections::VecDeque;

use cosmic::app::{Core, Task as CosmicTask};
use cosmic::widget::{button, icon, row};
use cosmic::{Application, Element, executor};

use crate::config::ChimeConfig;
use crate::core::reminder::ReminderScheduler;
use crate::core::store::TodoStore;
use crate::message::Message;
use crate::pages;

/// Date/time inputs for the reminder being scheduled. The target is pinned
/// by item id, not row position: the rows stay interactive while the form
/// is open, so positions can shift underneath it.
#[derive(Debug, Clone)]
pub struct ReminderForm {
    pub item: uuid::Uuid,
    pub date: String,
    pub time: String,
    /// Set when the last submit failed to parse; cleared on any input.
    pub invalid: bool,
}

pub struct Chime {
    core: Core,
    config: ChimeConfig,
    cosmic_config: cosmic::cosmic_config::Config,

    // Data
    store: TodoStore,
    scheduler: ReminderScheduler,

    // UI state
    todo_input: String,
    reminder_form: Option<ReminderForm>,
    /// Last form contents, so reopening the form offers the previous pick.
    last_reminder_date: String,
    last_reminder_time: String,
    /// Fired reminders waiting to be acknowledged, oldest first.
    pending_alerts: VecDeque<String>,
}

pub struct Flags {
    pub config: ChimeConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
}

impl Application for Chime {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = "dev.chime.app";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let app = Self {
            core,
            config: flags.config,
            cosmic_config: flags.cosmic_config,
            store: TodoStore::new(),
            scheduler: ReminderScheduler::new(),
            todo_input: String::new(),
            reminder_form: None,
            last_reminder_date: String::new(),
            last_reminder_time: String::new(),
            pending_alerts: VecDeque::new(),
        };

        (app, CosmicTask::none())
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        vec![
            row()
                .spacing(4)
                .push(
                    button::icon(icon::from_name("preferences-system-time-symbolic"))
                        .on_press(Message::ToggleClockFormat),
                )
                .into(),
        ]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::TodoInputChanged(value) => {
                self.todo_input = value;
            }

            Message::TodoSubmit => match self.store.add(&self.todo_input) {
                Ok(()) => {
                    self.todo_input.clear();
                    log::debug!("added todo ({} total)", self.store.len());
                }
                Err(e) => {
                    // Empty input is absorbed without clearing the field.
                    log::debug!("ignoring todo submit: {}", e);
                }
            },

            Message::EditTodo(index) => {
                if let Err(e) = self.store.begin_edit(index) {
                    log::warn!("cannot edit: {}", e);
                }
            }

            Message::EditInputChanged(value) => {
                self.store.update_edit_buffer(value);
            }

            Message::SaveEdit(index) => match self.store.commit_edit(index) {
                Ok(changed) => {
                    if changed {
                        log::debug!("updated todo at position {}", index);
                    }
                }
                Err(e) => log::warn!("cannot save edit: {}", e),
            },

            Message::DeleteTodo(index) => match self.store.delete(index) {
                // A reminder armed for the removed item stays armed; its
                // alert falls back to the text captured at scheduling time.
                Ok(item) => log::debug!("deleted todo {}", item.id),
                Err(e) => log::warn!("cannot delete: {}", e),
            },

            Message::OpenReminderForm(index) => match self.store.get(index) {
                Some(item) => {
                    let (date, time) = match item.reminder {
                        Some(reminder) => (
                            reminder.due.format("%Y-%m-%d").to_string(),
                            reminder.due.format("%H:%M").to_string(),
                        ),
                        None => (
                            self.last_reminder_date.clone(),
                            self.last_reminder_time.clone(),
                        ),
                    };
                    self.reminder_form = Some(ReminderForm {
                        item: item.id,
                        date,
                        time,
                        invalid: false,
                    });
                }
                None => log::warn!("no todo at position {}", index),
            },

            Message::CancelReminderForm => {
                self.close_reminder_form();
            }

            Message::ReminderDateChanged(value) => {
                if let Some(form) = self.reminder_form.as_mut() {
                    form.date = value;
                    form.invalid = false;
                }
            }

            Message::ReminderTimeChanged(value) => {
                if let Some(form) = self.reminder_form.as_mut() {
                    form.time = value;
                    form.invalid = false;
                }
            }

            Message::ReminderPreset(due) => {
                if let Some(form) = self.reminder_form.as_mut() {
                    form.date = due.format("%Y-%m-%d").to_string();
                    form.time = due.format("%H:%M").to_string();
                    form.invalid = false;
                }
            }

            Message::SubmitReminder => {
                let Some(form) = self.reminder_form.as_mut() else {
                    return CosmicTask::none();
                };
                let Some(due) = parse_form_datetime(&form.date, &form.time) else {
                    // No usable instant yet; the form stays open.
                    form.invalid = true;
                    return CosmicTask::none();
                };
                let item = form.item;
                self.close_reminder_form();

                // The list may have shifted while the form was open; the id
                // finds the target's current position.
                let Some(index) = self.store.position_of(item) else {
                    log::warn!("reminder target {} was deleted", item);
                    return CosmicTask::none();
                };
                match self.store.set_reminder(index, due) {
                    Ok(ticket) => {
                        self.scheduler.arm(&ticket);
                        return CosmicTask::perform(
                            ReminderScheduler::deliver(ticket),
                            |ticket| cosmic::Action::App(Message::ReminderFired(ticket)),
                        );
                    }
                    Err(e) => log::warn!("cannot set reminder: {}", e),
                }
            }

            Message::ReminderFired(ticket) => {
                self.scheduler.confirm_fired();
                self.store.mark_fired(&ticket);
                let text = self.store.notification_text(&ticket);
                log::info!(
                    "reminder fired for {} ({} still pending)",
                    ticket.item,
                    self.scheduler.pending()
                );
                self.pending_alerts.push_back(text);
            }

            Message::DismissAlert => {
                self.pending_alerts.pop_front();
            }

            Message::ToggleClockFormat => {
                self.config.twelve_hour_clock = !self.config.twelve_hour_clock;
                self.save_config();
            }
        }

        CosmicTask::none()
    }

    fn on_escape(&mut self) -> CosmicTask<Message> {
        if self.pending_alerts.pop_front().is_some() {
            return CosmicTask::none();
        }
        self.close_reminder_form();
        CosmicTask::none()
    }

    fn view(&self) -> Element<'_, Message> {
        pages::todos::todos_view(
            &self.store,
            &self.todo_input,
            self.pending_alerts.front().map(String::as_str),
            self.reminder_form.as_ref(),
            self.config.time_format(),
        )
    }
}

impl Chime {
    /// Drop the form, remembering its inputs for the next open.
    fn close_reminder_form(&mut self) {
        if let Some(form) = self.reminder_form.take() {
            self.last_reminder_date = form.date;
            self.last_reminder_time = form.time;
        }
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}

fn parse_form_datetime(date_str: &str, time_str: &str) -> Option<chrono::NaiveDateTime> {
    let date = chrono::NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()?;
    let time = chrono::NaiveTime::parse_from_str(time_str.trim(), "%H:%M").ok()?;
    Some(date.and_time(time))
}
