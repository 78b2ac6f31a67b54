use crate::utils::error::{GalleryError, Result};
use chrono::{DateTime, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// First day of the APOD archive.
pub const EARLIEST_DATE: NaiveDate = match NaiveDate::from_ymd_opt(1995, 6, 16) {
    Some(date) => date,
    None => panic!("invalid archive epoch"),
};

/// Maximum distance between the start and end of a derived range.
pub const RANGE_SPAN_DAYS: i64 = 8;

pub fn range_span() -> Duration {
    Duration::days(RANGE_SPAN_DAYS)
}

/// A feed record exactly as it arrives over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub hdurl: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    /// Anything other than `"video"`, including a missing value, is an image.
    pub fn from_feed(value: Option<&str>) -> Self {
        match value {
            Some("video") => MediaType::Video,
            _ => MediaType::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub date: NaiveDate,
    pub title: Option<String>,
    pub explanation: Option<String>,
    pub media_type: MediaType,
    pub url: String,
    pub hdurl: Option<String>,
    pub copyright: Option<String>,
}

impl Entry {
    pub fn key(&self) -> EntryKey {
        EntryKey {
            date: self.date,
            url: self.url.clone(),
        }
    }

    pub fn title_or_default(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => "Untitled",
        }
    }

    pub fn explanation_or_default(&self) -> &str {
        self.explanation.as_deref().unwrap_or("")
    }

    /// e.g. "January 5, 2024"
    pub fn formatted_date(&self) -> String {
        self.date.format("%B %-d, %Y").to_string()
    }

    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }
}

impl TryFrom<RawEntry> for Entry {
    type Error = GalleryError;

    fn try_from(raw: RawEntry) -> Result<Self> {
        let date_str = raw
            .date
            .as_deref()
            .ok_or_else(|| GalleryError::FeedMalformed {
                message: "entry has no date".to_string(),
            })?;
        let date = parse_calendar_date(date_str).ok_or_else(|| GalleryError::FeedMalformed {
            message: format!("unparsable entry date '{}'", date_str),
        })?;

        Ok(Entry {
            date,
            media_type: MediaType::from_feed(raw.media_type.as_deref()),
            url: raw.url.unwrap_or_default(),
            title: raw.title,
            explanation: raw.explanation,
            hdurl: raw.hdurl.filter(|u| !u.is_empty()),
            copyright: raw.copyright.map(|c| c.trim().to_string()).filter(|c| !c.is_empty()),
        })
    }
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; only the calendar date is kept.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Identity of a card: two entries with the same date and url are the same card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryKey {
    pub date: NaiveDate,
    pub url: String,
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}|{}", self.date, self.url)
    }
}

/// What the two date fields currently hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateSelection {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateSelection {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn to_range(&self) -> Result<DateRange> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Ok(DateRange::new(start, end)),
            _ => Err(GalleryError::validation("Please select both dates.")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// An inverted range (`start > end`) is allowed and matches no date.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open(Entry),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open(_))
    }

    pub fn entry(&self) -> Option<&Entry> {
        match self {
            ModalState::Open(entry) => Some(entry),
            ModalState::Closed => None,
        }
    }
}

/// The three ways a user can dismiss the detail view. All behave the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseSignal {
    CloseControl,
    Backdrop,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Media shown inside a gallery card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardMedia {
    Image { src: String, alt: String },
    VideoThumbnail { src: String, alt: String },
    VideoLink { href: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub key: EntryKey,
    pub title: String,
    pub date: String,
    pub media: CardMedia,
    pub video_badge: bool,
    pub detail: Detail,
}

/// Media shown inside the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailMedia {
    Image { src: String, alt: String },
    Embed { src: String },
    Link { href: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detail {
    pub key: EntryKey,
    pub title: String,
    pub date: String,
    pub explanation: String,
    pub copyright: Option<String>,
    pub media: DetailMedia,
}
