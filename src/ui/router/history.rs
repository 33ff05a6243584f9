//! Address paths and the back/forward stack.

/// Prefix of every screen path.
pub const APP_PATH_PREFIX: &str = "/app/";

/// Address path for screen `name`.
pub fn screen_path(name: &str) -> String {
    format!("{APP_PATH_PREFIX}{name}")
}

/// Screen named by an address path.
///
/// Strips [`APP_PATH_PREFIX`] and any trailing `/`. A path outside the
/// prefix, or with nothing after it, resolves to `default`.
pub fn resolve_initial_screen(path: &str, default: &str) -> String {
    path.strip_prefix(APP_PATH_PREFIX)
        .map(|rest| rest.trim_end_matches('/'))
        .filter(|rest| !rest.is_empty())
        .map_or_else(|| default.to_string(), str::to_string)
}

/// Browser-style session history of address paths.
///
/// `push` drops any forward entries; `back`/`forward` move the cursor and
/// return the path that became current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
    cursor: usize,
}

impl History {
    pub fn new(initial_path: impl Into<String>) -> Self {
        Self {
            entries: vec![initial_path.into()],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Replaces the current entry without adding one.
    pub fn replace(&mut self, path: impl Into<String>) {
        self.entries[self.cursor] = path.into();
    }

    pub fn push(&mut self, path: impl Into<String>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(path.into());
        self.cursor += 1;
    }

    pub fn back(&mut self) -> Option<&str> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&str> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
