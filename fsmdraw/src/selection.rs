use serde::Serialize;

/// Outcome of activating an arrow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Activation {
    Activated { id: u32 },
    Switched { from: u32, to: u32 },
    AlreadyActive { id: u32 },
}

/// Which arrow, if any, is highlighted. At most one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    active: Option<u32>,
}

impl Selection {
    pub fn active(&self) -> Option<u32> {
        self.active
    }

    pub fn activate(&mut self, id: u32) -> Activation {
        match self.active.replace(id) {
            None => Activation::Activated { id },
            Some(prev) if prev == id => Activation::AlreadyActive { id },
            Some(prev) => Activation::Switched { from: prev, to: id },
        }
    }

    /// Clear the highlight, returning the arrow that was active.
    pub fn deactivate(&mut self) -> Option<u32> {
        self.active.take()
    }
}
