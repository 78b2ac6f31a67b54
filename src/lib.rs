pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, GalleryConfig};
pub use core::{
    app::{GalleryApp, RunReport},
    date_range::DateRangeController,
    feed::FeedClient,
    gallery::{GalleryPresenter, LoadOutcome},
};
pub use render::HtmlView;
pub use utils::error::{GalleryError, Result};
