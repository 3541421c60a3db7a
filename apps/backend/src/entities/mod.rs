pub mod draft_actions;
pub mod games;
pub mod series;

pub use draft_actions::Entity as DraftActions;
pub use draft_actions::Model as DraftAction;
pub use games::Entity as Games;
pub use games::Model as Game;
pub use series::Entity as Series;
pub use series::Model as SeriesRow;
