//! Model-View-Intent primitives shared by the router and the food editor.
//!
//! ```text
//! key press / request result ──→ Intent ──→ Reducer ──→ State ──→ draw
//! ```
//!
//! Reducers are pure: all network work happens outside them, and its
//! result comes back in as another intent.

mod intent;
mod reducer;
mod state;

pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
