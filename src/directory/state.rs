use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use crate::model::{FoodUpdate, User};

/// Errors that can occur during directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No user has the requested id.
    #[error("User '{id}' not found")]
    UserNotFound { id: String },

    /// The food index lies outside the user's list.
    #[error("Index {index} out of range for {len} foods")]
    InvalidIndex { index: usize, len: usize },

    #[error("Failed to read seed file '{path}': {source}")]
    SeedRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse seed file '{path}': {source}")]
    SeedParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Thread-safe user store.
///
/// Cloning is cheap and every clone sees the same records.
#[derive(Clone)]
pub struct UserDirectory {
    inner: Arc<RwLock<Vec<User>>>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(users)),
        }
    }

    /// Directory holding the three demo users.
    pub fn seeded() -> Self {
        Self::new(vec![
            demo_user("1", "Matt", ["cheese", "pie", "sausage"]),
            demo_user("2", "George", ["carrot", "cake", "tomato"]),
            demo_user("3", "Mildred", ["olives", "feta", "tofu"]),
        ])
    }

    /// Loads users from a JSON array file.
    pub fn from_file(path: &Path) -> Result<Self, DirectoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| DirectoryError::SeedRead {
            path: path.to_path_buf(),
            source,
        })?;
        let users: Vec<User> =
            serde_json::from_str(&content).map_err(|source| DirectoryError::SeedParse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(users))
    }

    /// Uses `seed_file` when given, the demo users otherwise.
    pub fn from_seed(seed_file: Option<&Path>) -> Result<Self, DirectoryError> {
        match seed_file {
            Some(path) => Self::from_file(path),
            None => Ok(Self::seeded()),
        }
    }

    /// All users in insertion order.
    pub fn list_users(&self) -> Vec<User> {
        self.inner.read().clone()
    }

    /// The user with `id`, if any.
    pub fn get_user(&self, id: &str) -> Option<User> {
        self.inner.read().iter().find(|u| u.id == id).cloned()
    }

    /// Replaces the food at `update.index` and returns the updated user.
    pub fn update_food(&self, update: &FoodUpdate) -> Result<User, DirectoryError> {
        let mut users = self.inner.write();
        let user = users
            .iter_mut()
            .find(|u| u.id == update.id)
            .ok_or_else(|| DirectoryError::UserNotFound {
                id: update.id.clone(),
            })?;

        let len = user.foods.len();
        let slot = user
            .foods
            .get_mut(update.index)
            .ok_or(DirectoryError::InvalidIndex {
                index: update.index,
                len,
            })?;
        *slot = update.food.clone();

        tracing::info!(
            user = %update.id,
            index = update.index,
            food = %update.food,
            "Updated favourite food"
        );
        Ok(user.clone())
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::seeded()
    }
}

fn demo_user<const N: usize>(id: &str, name: &str, foods: [&str; N]) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        foods: foods.into_iter().map(String::from).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(id: &str, index: usize, food: &str) -> FoodUpdate {
        FoodUpdate {
            id: id.to_string(),
            food: food.to_string(),
            index,
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        let directory = UserDirectory::seeded();
        assert!(directory.get_user("99").is_none());
    }

    #[test]
    fn list_preserves_order() {
        let names: Vec<String> = UserDirectory::seeded()
            .list_users()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["Matt", "George", "Mildred"]);
    }

    #[test]
    fn update_is_visible_to_later_reads() {
        let directory = UserDirectory::seeded();
        let updated = directory.update_food(&update("1", 0, "toast")).unwrap();
        assert_eq!(updated.foods, vec!["toast", "pie", "sausage"]);
        assert_eq!(directory.get_user("1").unwrap().foods[0], "toast");
    }

    #[test]
    fn update_unknown_user_fails() {
        let directory = UserDirectory::seeded();
        let err = directory.update_food(&update("99", 0, "toast")).unwrap_err();
        assert!(matches!(err, DirectoryError::UserNotFound { id } if id == "99"));
    }

    #[test]
    fn update_out_of_range_fails_without_growing() {
        let directory = UserDirectory::seeded();
        let err = directory.update_food(&update("1", 3, "toast")).unwrap_err();
        assert!(matches!(err, DirectoryError::InvalidIndex { index: 3, len: 3 }));
        assert_eq!(directory.get_user("1").unwrap().foods.len(), 3);
    }

    #[test]
    fn clones_share_records() {
        let directory = UserDirectory::seeded();
        let other = directory.clone();
        other.update_food(&update("2", 2, "potato")).unwrap();
        assert_eq!(directory.get_user("2").unwrap().foods[2], "potato");
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let directory = UserDirectory::new(vec![User {
            id: "1".to_string(),
            name: "Matt".to_string(),
            foods: vec![String::new(); 8],
        }]);

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let directory = directory.clone();
                std::thread::spawn(move || {
                    directory
                        .update_food(&update("1", i, &format!("food-{i}")))
                        .unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let foods = directory.get_user("1").unwrap().foods;
        for (i, food) in foods.iter().enumerate() {
            assert_eq!(food, &format!("food-{i}"));
        }
    }

    #[test]
    fn loads_seed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(
            &path,
            r#"[{"id":"7","name":"Ada","foods":["bread"]}]"#,
        )
        .unwrap();
        let directory = UserDirectory::from_seed(Some(&path)).unwrap();
        assert_eq!(directory.get_user("7").unwrap().name, "Ada");
    }

    #[test]
    fn bad_seed_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            UserDirectory::from_file(&path),
            Err(DirectoryError::SeedParse { .. })
        ));
    }
}
