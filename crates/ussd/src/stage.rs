use serde::{Deserialize, Serialize};

/// Where a session currently sits in the menu sequence.
///
/// Terminal outcomes (committed, cancelled, exited) are not stages: the session
/// is deleted instead.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    #[default]
    MainMenu,
    MainMenuSelection,
    SelectSize,
    SelectQuantity,
    SelectToppings,
    ConfirmOrder,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::MainMenu => "MAIN_MENU",
            Stage::MainMenuSelection => "MAIN_MENU_SELECTION",
            Stage::SelectSize => "SELECT_SIZE",
            Stage::SelectQuantity => "SELECT_QUANTITY",
            Stage::SelectToppings => "SELECT_TOPPINGS",
            Stage::ConfirmOrder => "CONFIRM_ORDER",
        }
    }

    /// The only stage an accepted selection may move to.
    pub fn successor(&self) -> Option<Stage> {
        match self {
            Stage::MainMenu => Some(Stage::MainMenuSelection),
            Stage::MainMenuSelection => Some(Stage::SelectSize),
            Stage::SelectSize => Some(Stage::SelectQuantity),
            Stage::SelectQuantity => Some(Stage::SelectToppings),
            Stage::SelectToppings => Some(Stage::ConfirmOrder),
            Stage::ConfirmOrder => None,
        }
    }
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn successors_follow_declaration_order() {
        let mut stage = Stage::default();
        let mut seen = vec![stage];
        while let Some(next) = stage.successor() {
            assert!(next > stage);
            seen.push(next);
            stage = next;
        }
        assert_eq!(seen.len(), 6);
        assert_eq!(stage, Stage::ConfirmOrder);
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&Stage::SelectToppings).unwrap();
        assert_eq!(json, "\"SELECT_TOPPINGS\"");
        assert_eq!(Stage::MainMenuSelection.to_string(), "MAIN_MENU_SELECTION");
    }
}
