use std::time::Duration;

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::item::TodoItem;

/// Everything one delivery needs: the owning item, a snapshot of its text in
/// case it is deleted before the instant arrives, and the instant itself.
#[derive(Debug, Clone)]
pub struct ReminderTicket {
    pub item: Uuid,
    pub text: String,
    pub due: NaiveDateTime,
}

impl ReminderTicket {
    pub fn new(item: &TodoItem, due: NaiveDateTime) -> Self {
        Self {
            item: item.id,
            text: item.text.clone(),
            due,
        }
    }
}

/// One-shot reminder delivery. Every armed ticket gets exactly one delivery;
/// nothing is ever cancelled, not even when the owning item goes away, and
/// re-scheduling an item leaves the earlier timer running.
#[derive(Debug, Default)]
pub struct ReminderScheduler {
    armed: usize,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a ticket as armed. The caller drives the actual timer via
    /// [`ReminderScheduler::deliver`].
    pub fn arm(&mut self, ticket: &ReminderTicket) {
        self.armed += 1;
        log::info!("armed reminder for {} at {}", ticket.item, ticket.due);
    }

    /// Consume one delivery.
    pub fn confirm_fired(&mut self) {
        self.armed = self.armed.saturating_sub(1);
    }

    /// Deliveries armed but not yet consumed.
    pub fn pending(&self) -> usize {
        self.armed
    }

    /// Sleep until the ticket's instant, then yield the ticket back. An
    /// instant at or before now fires on the next timer tick.
    pub async fn deliver(ticket: ReminderTicket) -> ReminderTicket {
        let delay = delay_until(ticket.due, chrono::Local::now().naive_local());
        tokio::time::sleep(delay).await;
        ticket
    }
}

/// Time from `now` until `due`, clamped to zero when `due` is not in the
/// future.
pub fn delay_until(due: NaiveDateTime, now: NaiveDateTime) -> Duration {
    (due - now).to_std().unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::TodoStore;
    use std::time::Instant;

    fn in_millis(ms: i64) -> NaiveDateTime {
        chrono::Local::now().naive_local() + chrono::Duration::milliseconds(ms)
    }

    #[test]
    fn delay_clamps_past_instants_to_zero() {
        let now = chrono::Local::now().naive_local();
        assert_eq!(delay_until(now, now), Duration::ZERO);
        assert_eq!(
            delay_until(now - chrono::Duration::hours(3), now),
            Duration::ZERO
        );
        assert_eq!(
            delay_until(now + chrono::Duration::seconds(2), now),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn arming_and_confirming_track_pending() {
        let mut store = TodoStore::new();
        store.add("water plants").unwrap();
        let ticket = store.set_reminder(0, in_millis(60_000)).unwrap();

        let mut scheduler = ReminderScheduler::new();
        assert_eq!(scheduler.pending(), 0);
        scheduler.arm(&ticket);
        scheduler.arm(&ticket);
        assert_eq!(scheduler.pending(), 2);
        scheduler.confirm_fired();
        assert_eq!(scheduler.pending(), 1);
        scheduler.confirm_fired();
        scheduler.confirm_fired();
        assert_eq!(scheduler.pending(), 0);
    }

    #[tokio::test]
    async fn delivers_after_the_due_instant() {
        let mut store = TodoStore::new();
        store.add("water plants").unwrap();
        let ticket = store.set_reminder(0, in_millis(80)).unwrap();

        let started = Instant::now();
        let delivered = ReminderScheduler::deliver(ticket).await;
        assert!(started.elapsed() >= Duration::from_millis(60));
        assert_eq!(delivered.text, "water plants");
        assert_eq!(store.notification_text(&delivered), "water plants");
    }

    #[tokio::test]
    async fn past_instant_fires_immediately() {
        let mut store = TodoStore::new();
        store.add("overdue").unwrap();
        let ticket = store.set_reminder(0, in_millis(-60_000)).unwrap();

        let started = Instant::now();
        ReminderScheduler::deliver(ticket).await;
        assert!(started.elapsed() < Duration::from_millis(250));
    }

    #[tokio::test]
    async fn delivery_text_tracks_edits_made_before_firing() {
        let mut store = TodoStore::new();
        store.add("wash car").unwrap();
        let ticket = store.set_reminder(0, in_millis(100)).unwrap();

        store.begin_edit(0).unwrap();
        store.update_edit_buffer("wash the car");
        store.commit_edit(0).unwrap();

        let delivered = ReminderScheduler::deliver(ticket).await;
        assert_eq!(store.notification_text(&delivered), "wash the car");
    }

    #[tokio::test]
    async fn deletion_does_not_suppress_delivery() {
        let mut store = TodoStore::new();
        store.add("wash car").unwrap();
        let ticket = store.set_reminder(0, in_millis(80)).unwrap();
        store.delete(0).unwrap();

        let delivered = ReminderScheduler::deliver(ticket).await;
        assert_eq!(store.notification_text(&delivered), "wash car");
    }

    #[tokio::test]
    async fn rescheduling_delivers_both_timers() {
        let mut store = TodoStore::new();
        store.add("water plants").unwrap();
        let first = store.set_reminder(0, in_millis(60)).unwrap();
        let second = store.set_reminder(0, in_millis(120)).unwrap();

        let mut scheduler = ReminderScheduler::new();
        scheduler.arm(&first);
        scheduler.arm(&second);

        let (a, b) = tokio::join!(
            ReminderScheduler::deliver(first),
            ReminderScheduler::deliver(second),
        );
        scheduler.confirm_fired();
        scheduler.confirm_fired();

        assert!(a.due < b.due);
        assert_eq!(scheduler.pending(), 0);

        // Only the delivery matching the current reminder flips its state.
        store.mark_fired(&a);
        assert!(!store.items()[0].reminder.unwrap().is_fired());
        store.mark_fired(&b);
        assert!(store.items()[0].reminder.unwrap().is_fired());
    }
}
