//! Card catalog and game setup

pub mod catalog;
pub mod game_init;
pub mod sample_cards;

pub use catalog::CardCatalog;
pub use game_init::GameInitializer;
