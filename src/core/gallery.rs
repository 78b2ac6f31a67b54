use crate::core::video;
use crate::core::{
    Card, CardMedia, CloseSignal, DateRange, DateSelection, Detail, DetailMedia, Entry, EntryKey,
    FeedSource, GalleryView, ModalState, Status, StatusKind,
};
use crate::utils::error::{GalleryError, Result};

pub const LOADING_MESSAGE: &str = "🔄 Loading space photos…";
pub const FAILURE_MESSAGE: &str = "Could not load images. Check the feed URL or your connection.";
pub const EMPTY_MESSAGE: &str = "No results for that date range.";

/// Handed out by [`GalleryPresenter::begin_load`]; identifies one load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
    range: DateRange,
}

/// What happened to a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Rendered(usize),
    Failed,
    /// A newer load started before this one finished.
    Stale,
    /// No fetch happened because the selection was incomplete.
    Rejected,
}

pub struct GalleryPresenter<F: FeedSource, V: GalleryView> {
    feed: F,
    view: V,
    entries: Vec<Entry>,
    modal: ModalState,
    epoch: u64,
}

impl<F: FeedSource, V: GalleryView> GalleryPresenter<F, V> {
    pub fn new(feed: F, view: V) -> Self {
        Self {
            feed,
            view,
            entries: Vec::new(),
            modal: ModalState::Closed,
            epoch: 0,
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// The entries currently on screen, newest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    /// Validate, fetch, filter, sort and render in one go.
    pub async fn load_and_render(&mut self, selection: DateSelection) -> LoadOutcome {
        let ticket = match self.begin_load(selection) {
            Ok(ticket) => ticket,
            Err(_) => return LoadOutcome::Rejected,
        };

        let result = self.feed.fetch_all().await;
        self.complete_load(ticket, result)
    }

    /// Synchronous half of a load: shows the loading status and empties the
    /// gallery before any fetch is started.
    pub fn begin_load(&mut self, selection: DateSelection) -> Result<LoadTicket> {
        let range = match selection.to_range() {
            Ok(range) => range,
            Err(e) => {
                tracing::info!("Load rejected: {}", e);
                self.view
                    .set_status(Status::new(StatusKind::Info, e.user_friendly_message()));
                return Err(e);
            }
        };

        self.epoch += 1;
        tracing::info!("Loading entries for {} (load #{})", range, self.epoch);
        if range.is_inverted() {
            tracing::warn!(
                "Start date {} is after end date {}; nothing can match",
                range.start(),
                range.end()
            );
        }

        self.view
            .set_status(Status::new(StatusKind::Loading, LOADING_MESSAGE));
        self.entries.clear();
        self.view.clear_gallery();

        Ok(LoadTicket {
            epoch: self.epoch,
            range,
        })
    }

    pub fn complete_load(&mut self, ticket: LoadTicket, result: Result<Vec<Entry>>) -> LoadOutcome {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                "Discarding stale load #{} (latest is #{})",
                ticket.epoch,
                self.epoch
            );
            return LoadOutcome::Stale;
        }

        match result {
            Ok(all) => {
                let total = all.len();
                let list = filter_and_sort(all, &ticket.range);
                tracing::info!("{} of {} feed entries fall in {}", list.len(), total, ticket.range);

                let count = list.len();
                self.render(list);
                self.view
                    .set_status(Status::new(StatusKind::Success, loaded_message(count)));
                LoadOutcome::Rendered(count)
            }
            Err(e) => {
                log_feed_error(&e);
                self.view
                    .set_status(Status::new(StatusKind::Error, FAILURE_MESSAGE));
                LoadOutcome::Failed
            }
        }
    }

    /// Replaces the gallery with cards for `entries`; an empty list shows the placeholder.
    pub fn render(&mut self, entries: Vec<Entry>) {
        self.view.clear_gallery();

        if entries.is_empty() {
            self.view.show_placeholder(EMPTY_MESSAGE);
        } else {
            let cards = entries.iter().map(build_card).collect();
            self.view.show_cards(cards);
        }

        self.entries = entries;
    }

    pub fn open_detail(&mut self, entry: &Entry) {
        tracing::debug!("Opening detail for {}", entry.key());
        self.view.show_detail(build_detail(entry));
        self.modal = ModalState::Open(entry.clone());
    }

    /// Opens the detail view for a rendered card. Returns false when no card has that key.
    pub fn open_detail_by_key(&mut self, key: &EntryKey) -> bool {
        match self.entries.iter().find(|e| e.key() == *key).cloned() {
            Some(entry) => {
                self.open_detail(&entry);
                true
            }
            None => false,
        }
    }

    pub fn close_detail(&mut self, signal: CloseSignal) {
        if !self.modal.is_open() {
            return;
        }
        tracing::debug!("Closing detail ({:?})", signal);
        self.view.hide_detail();
        self.modal = ModalState::Closed;
    }
}

/// Keeps entries inside `range`, newest first. Entries sharing a date keep feed order.
pub fn filter_and_sort(entries: Vec<Entry>, range: &DateRange) -> Vec<Entry> {
    let mut list: Vec<Entry> = entries
        .into_iter()
        .filter(|entry| range.contains(entry.date))
        .collect();
    // sort_by is stable
    list.sort_by(|a, b| b.date.cmp(&a.date));
    list
}

pub fn loaded_message(count: usize) -> String {
    format!("Loaded {} {}.", count, if count == 1 { "item" } else { "items" })
}

fn log_feed_error(error: &GalleryError) {
    tracing::error!(
        "Feed load failed: {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", error.recovery_suggestion());
}

fn alt_text(entry: &Entry, fallback: &str) -> String {
    match entry.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => fallback.to_string(),
    }
}

pub fn build_card(entry: &Entry) -> Card {
    let media = if entry.is_video() {
        match youtube_video_id(&entry.url) {
            Some(id) => CardMedia::VideoThumbnail {
                src: video::thumbnail_url(&id),
                alt: format!("{} (video)", alt_text(entry, "APOD video")),
            },
            None => CardMedia::VideoLink {
                href: entry.url.clone(),
            },
        }
    } else {
        CardMedia::Image {
            src: entry.url.clone(),
            alt: alt_text(entry, "APOD image"),
        }
    };

    Card {
        key: entry.key(),
        title: entry.title_or_default().to_string(),
        date: entry.formatted_date(),
        media,
        video_badge: entry.is_video(),
        detail: build_detail(entry),
    }
}

pub fn build_detail(entry: &Entry) -> Detail {
    let media = if entry.is_video() {
        if video::is_youtube(&entry.url) {
            let src = video::youtube_id(&entry.url)
                .map(|id| video::embed_url(&id))
                .unwrap_or_else(|| entry.url.clone());
            DetailMedia::Embed { src }
        } else {
            DetailMedia::Link {
                href: entry.url.clone(),
            }
        }
    } else {
        DetailMedia::Image {
            src: entry.hdurl.clone().unwrap_or_else(|| entry.url.clone()),
            alt: alt_text(entry, "APOD image"),
        }
    };

    Detail {
        key: entry.key(),
        title: entry.title_or_default().to_string(),
        date: entry.formatted_date(),
        explanation: entry.explanation_or_default().to_string(),
        copyright: entry.copyright.clone(),
        media,
    }
}

fn youtube_video_id(url: &str) -> Option<String> {
    if video::is_youtube(url) {
        video::youtube_id(url)
    } else {
        None
    }
}
