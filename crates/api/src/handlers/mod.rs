pub mod assets;
pub mod health;
pub mod pages;
pub mod public;
pub mod translate;
