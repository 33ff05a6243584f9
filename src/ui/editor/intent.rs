use crate::ui::mvi::Intent;

#[derive(Debug, Clone)]
pub enum EditorIntent {
    /// Replace every row with one per item.
    Build { items: Vec<String> },
    InputChanged { index: usize, value: String },
    /// A request for `index` is about to be sent.
    SaveStarted { index: usize },
    SaveSucceeded { request: u64 },
    SaveFailed { request: u64 },
    /// Row `index` failed validation; nothing was sent.
    SaveRejected { index: usize },
}

impl Intent for EditorIntent {}
