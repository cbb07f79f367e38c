/// Issues item ids derived from the creation timestamp.
///
/// An id is the wall-clock time in milliseconds as a decimal string. Two items
/// created within the same millisecond would collide, so the generator never
/// issues a value at or below the last one it issued or observed.
///
/// Once the numeric range is used up (a stored id of `u64::MAX`), ids take the
/// form `"{now}-{n}"` with a running counter. Those never parse as numbers, so
/// they can't collide with numeric ids; [`crate::TodoStore`] skips any that
/// are already in use.
#[derive(Clone, Debug, Default)]
pub struct IdGenerator {
    last: u64,
    exhausted: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh id for an item created now.
    pub fn next_id(&mut self) -> String {
        self.next_id_at(current_millis())
    }

    fn next_id_at(&mut self, now: u64) -> String {
        match self.last.checked_add(1) {
            Some(floor) => {
                let id = now.max(floor);
                self.last = id;
                id.to_string()
            }
            None => {
                let n = self.exhausted;
                self.exhausted = self.exhausted.wrapping_add(1);
                format!("{now}-{n}")
            }
        }
    }

    /// Account for an id already in use. Non-numeric ids can't collide with
    /// numeric ones and are ignored.
    pub fn observe(&mut self, id: &str) {
        if let Ok(n) = id.parse::<u64>() {
            self.last = self.last.max(n);
        }
    }
}

fn current_millis() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now() as u64
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}
