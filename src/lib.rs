pub mod app;
pub mod capability;
pub mod config;
pub mod gallery;
pub mod manifest;
pub mod render;
pub mod terminal;
