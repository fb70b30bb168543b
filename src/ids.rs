use crate::domain::UserId;

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// Hands out creation-timestamp ids that never repeat and never go backwards.
///
/// Two ids requested within the same millisecond (or after the wall clock
/// stepped back) get `last + 1`. Once `last` has reached `i64::MAX` no
/// larger id exists and [`TimestampIds::next_id`] returns `None`.
pub struct TimestampIds {
    clock: Clock,
    last: i64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::with_clock(|| chrono::Utc::now().timestamp_millis())
    }

    pub fn with_clock(clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            last: i64::MIN,
        }
    }

    /// Ensures later ids sort after `id`, e.g. after loading stored users.
    pub fn observe(&mut self, id: UserId) {
        self.last = self.last.max(id.0);
    }

    pub fn next_id(&mut self) -> Option<UserId> {
        let now = (self.clock)();
        let id = if now > self.last {
            now
        } else {
            self.last.checked_add(1)?
        };
        self.last = id;
        Some(UserId(id))
    }
}

impl Default for TimestampIds {
    fn default() -> Self {
        Self::new()
    }
}
