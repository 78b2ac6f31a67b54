use crate::config::GalleryConfig;
use crate::core::date_range::DateRangeController;
use crate::core::gallery::{GalleryPresenter, LoadOutcome};
use crate::core::{FeedSource, Status, Storage};
use crate::render::facts::random_fact;
use crate::render::HtmlView;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use chrono::NaiveDate;

pub const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub output_path: String,
    pub outcome: LoadOutcome,
    pub status: Option<Status>,
    pub opened_detail: bool,
}

/// One run of the gallery: pick the range, load, optionally open a detail, write the page.
pub struct GalleryApp<S: Storage, F: FeedSource> {
    config: GalleryConfig,
    storage: S,
    controller: DateRangeController,
    presenter: GalleryPresenter<F, HtmlView>,
}

impl<S: Storage, F: FeedSource> GalleryApp<S, F> {
    pub fn new(config: GalleryConfig, storage: S, feed: F, today: NaiveDate) -> Self {
        let mut controller = DateRangeController::initialize(today);
        if config.start.is_some() {
            controller.on_start_changed(config.start);
        }
        if config.end.is_some() {
            controller.on_end_changed(config.end);
        }

        let mut view = HtmlView::new(config.title.clone()).with_fact(random_fact());
        view.set_date_fields(controller.start_field(), controller.end_field());

        Self {
            config,
            storage,
            controller,
            presenter: GalleryPresenter::new(feed, view),
        }
    }

    pub fn controller(&self) -> &DateRangeController {
        &self.controller
    }

    pub fn presenter(&self) -> &GalleryPresenter<F, HtmlView> {
        &self.presenter
    }

    pub async fn run(&mut self) -> Result<RunReport> {
        self.config.validate()?;

        let selection = self.controller.selection();
        tracing::info!(
            "🚀 Building gallery for {:?} .. {:?}",
            selection.start,
            selection.end
        );

        let outcome = self.presenter.load_and_render(selection).await;

        let opened_detail = match self.config.open {
            Some(day) => self.open_day(day),
            None => false,
        };

        let document = self.presenter.view().render_document();
        tracing::debug!("Writing {} ({} bytes)", INDEX_FILE, document.len());
        self.storage
            .write_file(INDEX_FILE, document.as_bytes())
            .await?;

        let output_path = format!("{}/{}", self.config.output_path, INDEX_FILE);
        Ok(RunReport {
            output_path,
            outcome,
            status: self.presenter.view().status().cloned(),
            opened_detail,
        })
    }

    fn open_day(&mut self, day: NaiveDate) -> bool {
        let key = self
            .presenter
            .entries()
            .iter()
            .find(|entry| entry.date == day)
            .map(|entry| entry.key());

        match key {
            Some(key) => self.presenter.open_detail_by_key(&key),
            None => {
                tracing::warn!("No rendered entry for {}, detail view stays closed", day);
                false
            }
        }
    }
}
