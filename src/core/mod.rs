pub mod app;
pub mod date_range;
pub mod feed;
pub mod gallery;
pub mod video;

pub use crate::domain::model::{
    Card, CardMedia, CloseSignal, DateRange, DateSelection, Detail, DetailMedia, Entry, EntryKey,
    MediaType, ModalState, RawEntry, Status, StatusKind, EARLIEST_DATE, RANGE_SPAN_DAYS,
};
pub use crate::domain::ports::{ConfigProvider, FeedSource, GalleryView, Storage};
pub use crate::utils::error::Result;
