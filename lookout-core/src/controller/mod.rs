pub mod gallery;
pub mod lightbox;
pub mod nav;
pub mod refresh;
pub mod settings;
