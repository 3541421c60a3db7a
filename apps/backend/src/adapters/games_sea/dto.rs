//! DTOs for games_sea adapter.

/// DTO for creating a game within a series.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub id: String,
    pub series_id: String,
    pub game_number: i32,
    pub blue_side: String,
    pub red_side: String,
}

impl GameCreate {
    pub fn new(id: impl Into<String>, series_id: impl Into<String>, game_number: i32) -> Self {
        Self {
            id: id.into(),
            series_id: series_id.into(),
            game_number,
            blue_side: String::new(),
            red_side: String::new(),
        }
    }

    pub fn with_sides(mut self, blue: impl Into<String>, red: impl Into<String>) -> Self {
        self.blue_side = blue.into();
        self.red_side = red.into();
        self
    }
}
