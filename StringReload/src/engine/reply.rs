//! Ring of recently produced outputs

/// Number of remembered replies
pub const REPLY_SLOTS: usize = 100;

/// Fixed-size ring of normalized outputs.
///
/// Hosts often feed a translated string back through the reloader; a string
/// found here was produced by the engine and must not be translated again.
#[derive(Debug, Clone, Default)]
pub struct ReplyRing {
    slots: Vec<String>,
    next: usize,
}

impl ReplyRing {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Vec::with_capacity(REPLY_SLOTS),
            next: 0,
        }
    }

    pub fn push(&mut self, reply: String) {
        if self.slots.len() < REPLY_SLOTS {
            self.slots.push(reply);
        } else {
            self.slots[self.next] = reply;
        }
        self.next = (self.next + 1) % REPLY_SLOTS;
        tracing::trace!("Reply cached, next slot {}", self.next);
    }

    #[must_use]
    pub fn contains(&self, text: &str) -> bool {
        self.slots.iter().any(|slot| slot == text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.next = 0;
    }
}
