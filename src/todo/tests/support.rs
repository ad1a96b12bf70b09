//! Shared fixtures for todo unit tests.

use crate::todo::domain::{DueDate, NewTodo, Priority, Tags, Title, Todo, TodoId};
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::Mutex;

/// Clock frozen at a settable instant.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.lock().expect("clock lock");
        *now += delta;
    }
}

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn id(raw: &str) -> TodoId {
    TodoId::new(raw).expect("valid id")
}

pub fn due(raw: &str) -> DueDate {
    DueDate::parse(raw).expect("valid due date")
}

/// Builds an active todo with the given title, created at `now`.
pub fn active(raw_id: &str, title: &str, now: DateTime<Utc>) -> Todo {
    draft(raw_id, title).create_at(now)
}

/// Builder over [`NewTodo`] for concise test setup.
pub struct Draft {
    params: NewTodo,
}

pub fn draft(raw_id: &str, title: &str) -> Draft {
    Draft {
        params: NewTodo {
            id: id(raw_id),
            title: Title::new(title).expect("valid title"),
            priority: Priority::Medium,
            tags: Tags::default(),
            due_date: None,
        },
    }
}

impl Draft {
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.params.priority = priority;
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.params.tags = Tags::new(tags);
        self
    }

    pub fn due(mut self, raw: &str) -> Self {
        self.params.due_date = Some(due(raw));
        self
    }

    pub fn create_at(self, now: DateTime<Utc>) -> Todo {
        Todo::create(self.params, now).into_parts().0
    }
}
