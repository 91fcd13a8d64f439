use chrono::Utc;
use rand::Rng;

/// Hands out entry ids of the form `<millis>-<4 hex digits>`.
///
/// The millisecond part never repeats within one generator, even when several
/// entries are added in the same millisecond (bulk import); the random suffix
/// covers ids minted by an earlier process whose clock ran ahead.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last_millis: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> String {
        let now = Utc::now().timestamp_millis();
        let millis = if now > self.last_millis {
            now
        } else {
            self.last_millis + 1
        };
        self.last_millis = millis;
        let suffix: u16 = rand::thread_rng().gen();
        format!("{}-{:04x}", millis, suffix)
    }

    /// Like `next_id`, but redraws until `taken` reports the id as free.
    pub fn next_unused<F>(&mut self, taken: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        loop {
            let id = self.next_id();
            if !taken(&id) {
                return id;
            }
        }
    }
}
