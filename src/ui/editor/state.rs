use crate::ui::mvi::UiState;

/// One editable line, identified only by its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoodRow {
    pub index: usize,
    pub input: String,
    pub dirty: bool,
    pub saving: bool,
    pub save_enabled: bool,
}

/// Outcome of the most recent save, shown under the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved,
    /// Persists until the next successful save.
    Failed,
}

impl SaveStatus {
    pub fn message(self) -> Option<&'static str> {
        match self {
            SaveStatus::Idle => None,
            SaveStatus::Saving => Some("Saving…"),
            SaveStatus::Saved => Some("Saved"),
            SaveStatus::Failed => Some("Could not save"),
        }
    }
}

/// The one save allowed to be outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlightSave {
    /// Id carried by the request and its result.
    pub request: u64,
    pub index: usize,
    /// Value that was sent.
    pub value: String,
    /// Rows whose save control was enabled before all were disabled.
    pub restore: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
    pub rows: Vec<FoodRow>,
    pub status: SaveStatus,
    pub in_flight: Option<InFlightSave>,
    /// Id for the next save. Survives rebuilds so a late result from an
    /// earlier build never matches.
    pub next_request: u64,
}

impl UiState for EditorState {}

impl EditorState {
    pub fn is_saving(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn row(&self, index: usize) -> Option<&FoodRow> {
        self.rows.get(index)
    }

    /// Indices whose save control is enabled.
    pub fn enabled_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .filter(|r| r.save_enabled)
            .map(|r| r.index)
            .collect()
    }
}
