use chrono::{Duration, Local};
use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, scrollable, text, text_input};

use crate::application::ReminderForm;
use crate::components::todo_row::{TodoRowCtx, todo_row};
use crate::core::store::TodoStore;
use crate::fl;
use crate::message::Message;

pub fn todos_view(
    store: &TodoStore,
    input_value: &str,
    alert: Option<&str>,
    reminder_form: Option<&ReminderForm>,
    time_format: &'static str,
) -> Element<'static, Message> {
    let mut content = column().spacing(12);

    // Fired reminders surface one at a time, newest behind oldest.
    if let Some(alert_text) = alert {
        content = content.push(alert_banner(alert_text));
    }

    // Creation input
    let input = text_input::text_input(fl!("todo-placeholder"), input_value.to_string())
        .on_input(Message::TodoInputChanged)
        .on_submit(|_| Message::TodoSubmit)
        .width(Length::Fill);

    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(input)
            .push(
                button::icon(icon::from_name("list-add-symbolic")).on_press(Message::TodoSubmit),
            ),
    );

    content = content.push(text::title4(fl!("todos-title")));

    if let Some(form) = reminder_form {
        let target = store
            .find(form.item)
            .map(|item| item.text.clone())
            .unwrap_or_default();
        content = content.push(reminder_form_view(form, target));
    }

    if store.is_empty() {
        content = content.push(
            container(text::body(fl!("todos-empty")))
                .padding(32)
                .center_x(Length::Fill)
                .width(Length::Fill),
        );
    } else {
        let ctx = TodoRowCtx {
            editing_index: store.editing_index(),
            edit_buffer: store.edit_buffer(),
            time_format,
        };
        for (index, item) in store.items().iter().enumerate() {
            content = content.push(todo_row(item, index, &ctx));
        }
    }

    container(scrollable(content.padding(16).width(Length::Fill)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn alert_banner(alert_text: &str) -> Element<'static, Message> {
    let banner = column()
        .spacing(8)
        .push(text::title4(fl!("reminder-alert-title")))
        .push(text::body(alert_text.to_string()))
        .push(
            button::suggested(fl!("reminder-alert-dismiss")).on_press(Message::DismissAlert),
        );

    container(banner).padding(16).width(Length::Fill).into()
}

fn reminder_form_view(form: &ReminderForm, target: String) -> Element<'static, Message> {
    let mut content = column().spacing(8);

    content = content.push(text::title4(fl!("reminder-form-title")));
    content = content.push(text::caption(fl!("reminder-form-for", text = target)));

    content = content.push(
        row()
            .spacing(8)
            .push(
                text_input::text_input("YYYY-MM-DD", form.date.clone())
                    .on_input(Message::ReminderDateChanged)
                    .width(Length::Fill),
            )
            .push(
                text_input::text_input("HH:MM", form.time.clone())
                    .on_input(Message::ReminderTimeChanged)
                    .width(Length::Fixed(80.0)),
            ),
    );

    // Quick picks fill the inputs; the instant still goes through Set.
    let now = Local::now().naive_local();
    let tomorrow_morning = (Local::now().date_naive() + Duration::days(1))
        .and_hms_opt(9, 0, 0)
        .unwrap();
    content = content.push(
        row()
            .spacing(4)
            .push(
                button::standard(fl!("preset-one-minute"))
                    .on_press(Message::ReminderPreset(now + Duration::minutes(1))),
            )
            .push(
                button::standard(fl!("preset-ten-minutes"))
                    .on_press(Message::ReminderPreset(now + Duration::minutes(10))),
            )
            .push(
                button::standard(fl!("preset-one-hour"))
                    .on_press(Message::ReminderPreset(now + Duration::hours(1))),
            )
            .push(
                button::standard(fl!("preset-tomorrow"))
                    .on_press(Message::ReminderPreset(tomorrow_morning)),
            ),
    );

    if form.invalid {
        content = content.push(text::caption(fl!("reminder-invalid")));
    }

    content = content.push(
        row()
            .spacing(8)
            .push(button::suggested(fl!("reminder-set")).on_press(Message::SubmitReminder))
            .push(button::standard(fl!("reminder-cancel")).on_press(Message::CancelReminderForm)),
    );

    content.into()
}
