use crate::ui::editor::intent::EditorIntent;
use crate::ui::editor::state::{EditorState, FoodRow, InFlightSave, SaveStatus};
use crate::ui::mvi::Reducer;

pub struct EditorReducer;

impl Reducer for EditorReducer {
    type State = EditorState;
    type Intent = EditorIntent;

    fn reduce(mut state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            EditorIntent::Build { items } => EditorState {
                rows: items
                    .into_iter()
                    .enumerate()
                    .map(|(index, input)| FoodRow {
                        index,
                        input,
                        dirty: false,
                        saving: false,
                        save_enabled: false,
                    })
                    .collect(),
                status: SaveStatus::Idle,
                in_flight: None,
                next_request: state.next_request,
            },
            EditorIntent::InputChanged { index, value } => {
                let Some(row) = state.rows.get_mut(index) else {
                    return state;
                };
                row.input = value;
                row.dirty = true;
                match state.in_flight.as_mut() {
                    // Controls stay disabled until the outstanding save
                    // finishes; remember to enable this one then.
                    Some(save) => {
                        if !save.restore.contains(&index) {
                            save.restore.push(index);
                        }
                    }
                    None => row.save_enabled = true,
                }
                state
            }
            EditorIntent::SaveStarted { index } => {
                if state.in_flight.is_some() || index >= state.rows.len() {
                    return state;
                }
                let request = state.next_request;
                state.next_request += 1;
                let restore = state.enabled_rows();
                for row in &mut state.rows {
                    row.save_enabled = false;
                }
                let row = &mut state.rows[index];
                row.saving = true;
                state.in_flight = Some(InFlightSave {
                    request,
                    index,
                    value: row.input.clone(),
                    restore,
                });
                state.status = SaveStatus::Saving;
                state
            }
            EditorIntent::SaveSucceeded { request } => {
                let Some(save) = take_matching(&mut state, request) else {
                    return state;
                };
                for row in &mut state.rows {
                    if row.index == save.index {
                        row.saving = false;
                        // Edited again while saving: still dirty.
                        row.dirty = row.input != save.value;
                        row.save_enabled = row.dirty;
                    } else {
                        row.save_enabled = save.restore.contains(&row.index);
                    }
                }
                state.status = SaveStatus::Saved;
                state
            }
            EditorIntent::SaveFailed { request } => {
                let Some(save) = take_matching(&mut state, request) else {
                    return state;
                };
                for row in &mut state.rows {
                    if row.index == save.index {
                        row.saving = false;
                        row.save_enabled = true;
                    } else {
                        row.save_enabled = save.restore.contains(&row.index);
                    }
                }
                state.status = SaveStatus::Failed;
                state
            }
            EditorIntent::SaveRejected { index } => {
                if state.in_flight.is_none() && index < state.rows.len() {
                    state.status = SaveStatus::Failed;
                }
                state
            }
        }
    }
}

/// Takes the in-flight save if `request` is its id.
fn take_matching(state: &mut EditorState, request: u64) -> Option<InFlightSave> {
    if state.in_flight.as_ref().is_some_and(|s| s.request == request) {
        state.in_flight.take()
    } else {
        None
    }
}
