//! HUD and menu view models
//!
//! States describe what the overlay should show; the DOM (or any other
//! front end) only has to draw these structs.

use serde::Serialize;

pub const GAME_TITLE: &str = "Plane Panic";
pub const GAME_OVER_TEXT: &str = "GAME OVER\nPress RETURN to return to menu";

/// Whatever the current state wants on screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum View {
    Menu(MenuView),
    Play(PlayHud),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuOption {
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuView {
    pub title: String,
    pub options: Vec<MenuOption>,
    /// Present while the high-score panel is open
    pub high_score: Option<u64>,
}

impl MenuView {
    pub fn new(labels: &[&str], selected: usize, high_score: Option<u64>) -> Self {
        Self {
            title: GAME_TITLE.to_string(),
            options: labels
                .iter()
                .enumerate()
                .map(|(i, label)| MenuOption {
                    label: (*label).to_string(),
                    selected: i == selected,
                })
                .collect(),
            high_score,
        }
    }

    pub fn selected_label(&self) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.selected)
            .map(|o| o.label.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayHud {
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub game_over: bool,
    /// Only filled in when the FPS counter is enabled
    pub fps: Option<u32>,
}

impl PlayHud {
    pub fn lives_label(&self) -> String {
        format!("Energy: {}", self.lives)
    }

    pub fn score_label(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn high_score_label(&self) -> String {
        format!("Hi-Score: {}", self.high_score)
    }

    pub fn game_over_text(&self) -> Option<&'static str> {
        self.game_over.then_some(GAME_OVER_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_view_marks_selection() {
        let view = MenuView::new(&["Start Game", "High Scores"], 1, None);
        assert_eq!(view.title, GAME_TITLE);
        assert_eq!(view.selected_label(), Some("High Scores"));
        assert!(!view.options[0].selected);
    }

    #[test]
    fn test_hud_labels() {
        let hud = PlayHud {
            score: 40,
            high_score: 90,
            lives: 2,
            game_over: false,
            fps: None,
        };
        assert_eq!(hud.lives_label(), "Energy: 2");
        assert_eq!(hud.score_label(), "Score: 40");
        assert_eq!(hud.high_score_label(), "Hi-Score: 90");
        assert_eq!(hud.game_over_text(), None);

        let over = PlayHud {
            game_over: true,
            ..hud
        };
        assert_eq!(over.game_over_text(), Some(GAME_OVER_TEXT));
    }

    #[test]
    fn test_view_serializes_with_screen_tag() {
        let view = View::Menu(MenuView::new(&["Start Game"], 0, Some(5)));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["screen"], "menu");
        assert_eq!(json["high_score"], 5);
    }
}
