use cosmic::Element;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, text, text_input};

use crate::core::item::{ReminderState, TodoItem};
use crate::fl;
use crate::message::Message;

/// Render state for one row that the store itself doesn't carry.
pub struct TodoRowCtx<'a> {
    pub editing_index: Option<usize>,
    pub edit_buffer: &'a str,
    pub time_format: &'static str,
}

pub fn todo_row(item: &TodoItem, index: usize, ctx: &TodoRowCtx) -> Element<'static, Message> {
    let body: Element<'static, Message> = if ctx.editing_index == Some(index) {
        text_input::text_input(fl!("todo-placeholder"), ctx.edit_buffer.to_string())
            .on_input(Message::EditInputChanged)
            .on_submit(move |_| Message::SaveEdit(index))
            .width(Length::Fill)
            .into()
    } else {
        let mut lines = column().spacing(2);
        lines = lines.push(text::body(item.text.clone()));
        lines = lines.push(text::caption(item.updated.format(ctx.time_format).to_string()));
        if let Some(reminder) = item.reminder {
            let when = reminder.due.format(ctx.time_format).to_string();
            let label = match reminder.state {
                ReminderState::Scheduled => fl!("reminder-at", when = when),
                ReminderState::Fired => fl!("reminder-fired", when = when),
            };
            lines = lines.push(text::caption(label).size(11.0));
        }
        lines.into()
    };

    let edit_or_save = if ctx.editing_index == Some(index) {
        button::icon(icon::from_name("object-select-symbolic")).on_press(Message::SaveEdit(index))
    } else {
        button::icon(icon::from_name("document-edit-symbolic")).on_press(Message::EditTodo(index))
    };

    row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(container(body).width(Length::Fill))
        .push(edit_or_save)
        .push(
            button::icon(icon::from_name("alarm-symbolic"))
                .on_press(Message::OpenReminderForm(index)),
        )
        .push(
            button::icon(icon::from_name("edit-delete-symbolic"))
                .on_press(Message::DeleteTodo(index)),
        )
        .width(Length::Fill)
        .into()
}
