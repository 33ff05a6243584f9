//! Inline editor for a user's favourite foods.

mod intent;
mod reducer;
mod state;

pub use intent::EditorIntent;
pub use reducer::EditorReducer;
pub use state::{EditorState, FoodRow, InFlightSave, SaveStatus};

/// Sentence summarising a food list, e.g.
/// "Your favourite foods are: cheese, gravy, and sausage."
pub fn favourites_sentence(foods: &[String]) -> String {
    if foods.is_empty() {
        return "You have no favourite foods yet.".to_string();
    }

    let mut out = String::from("Your favourite foods are: ");
    let last = foods.len() - 1;
    for (i, food) in foods.iter().enumerate() {
        out.push_str(food);
        if i == last {
            out.push('.');
        } else if i + 1 == last {
            out.push_str(", and ");
        } else {
            out.push_str(", ");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foods(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn three_items() {
        assert_eq!(
            favourites_sentence(&foods(&["cheese", "gravy", "sausage"])),
            "Your favourite foods are: cheese, gravy, and sausage."
        );
    }

    #[test]
    fn two_items() {
        assert_eq!(
            favourites_sentence(&foods(&["cake", "tomato"])),
            "Your favourite foods are: cake, and tomato."
        );
    }

    #[test]
    fn one_item() {
        assert_eq!(
            favourites_sentence(&foods(&["tofu"])),
            "Your favourite foods are: tofu."
        );
    }

    #[test]
    fn no_items() {
        assert_eq!(favourites_sentence(&[]), "You have no favourite foods yet.");
    }
}
