//! Registered key listeners.

/// Keys a modal may listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissKey {
    Escape,
}

/// Identifies one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Key listeners that take priority over normal key handling.
#[derive(Debug, Default)]
pub struct KeyListeners {
    next_id: u64,
    entries: Vec<(ListenerId, DismissKey)>,
}

impl KeyListeners {
    pub fn add(&mut self, key: DismissKey) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.entries.push((id, key));
        id
    }

    pub fn remove(&mut self, id: ListenerId) {
        self.entries.retain(|(entry, _)| *entry != id);
    }

    pub fn is_listening(&self, key: DismissKey) -> bool {
        self.entries.iter().any(|(_, k)| *k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
