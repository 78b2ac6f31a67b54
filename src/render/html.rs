//! Static HTML rendition of the gallery page.
//!
//! Every card links to its own detail overlay (`#detail-N`), shown with the CSS
//! `:target` selector, so the written page stays interactive without a server.
//! A detail opened through the presenter is emitted already visible.

use crate::core::date_range::DateField;
use crate::core::{Card, CardMedia, Detail, DetailMedia, GalleryView, Status, StatusKind};
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
body{margin:0;font-family:system-ui,sans-serif;background:#0b0d17;color:#e8eaf6}
header{padding:1.5rem 2rem}
.filters{display:flex;gap:1rem;align-items:center;padding:0 2rem}
.status{padding:.5rem 2rem;min-height:1.5rem}
.status[data-kind=error]{color:#ff8a80}
.gallery{display:grid;grid-template-columns:repeat(auto-fill,minmax(260px,1fr));gap:1.25rem;padding:1rem 2rem}
.glass{background:rgba(255,255,255,.06);border:1px solid rgba(255,255,255,.12);border-radius:12px}
.card{overflow:hidden}
.card__media{position:relative;aspect-ratio:4/3;display:flex;align-items:center;justify-content:center;background:#000}
.card__media img{width:100%;height:100%;object-fit:cover}
.card__body{display:block;padding:.75rem 1rem;color:inherit;text-decoration:none}
.badge{position:absolute;top:.5rem;left:.5rem;background:#e53935;color:#fff;padding:.1rem .5rem;border-radius:6px;font-size:.8rem}
.placeholder{grid-column:1/-1;text-align:center;padding:3rem}
.placeholder-icon{font-size:3rem}
.modal{display:none;position:fixed;inset:0;z-index:10}
.modal:target,.modal.is-open{display:block}
.modal__backdrop{position:absolute;inset:0;background:rgba(0,0,0,.75)}
.modal__content{position:relative;max-width:900px;max-height:90vh;overflow:auto;margin:5vh auto;padding:1.5rem;background:#151932;border-radius:12px}
.modal__close{position:absolute;top:.5rem;right:1rem;font-size:1.75rem;color:inherit;text-decoration:none}
.modal__media img,.modal__media iframe{width:100%;border:0}
.modal__media iframe{aspect-ratio:16/9}
"#;

const SCRIPT: &str = r##"
function closeModal(){
  document.querySelectorAll(".modal.is-open").forEach(function(m){m.classList.remove("is-open");m.setAttribute("aria-hidden","true");});
  if(location.hash.indexOf("#detail-")===0){location.hash="gallery";}
}
document.querySelectorAll("[data-close]").forEach(function(el){el.addEventListener("click",function(e){e.preventDefault();closeModal();});});
window.addEventListener("keydown",function(e){if(e.key==="Escape"){closeModal();}});
"##;

#[derive(Debug, Clone, PartialEq, Eq)]
enum GalleryContent {
    Empty,
    Cards(Vec<Card>),
    Placeholder(String),
}

#[derive(Debug, Clone)]
struct DateInput {
    value: Option<String>,
    min: String,
    max: String,
}

impl From<&DateField> for DateInput {
    fn from(field: &DateField) -> Self {
        Self {
            value: field.value().map(|d| d.to_string()),
            min: field.min().to_string(),
            max: field.max().to_string(),
        }
    }
}

/// A [`GalleryView`] that accumulates page state and renders it as HTML.
#[derive(Debug, Clone)]
pub struct HtmlView {
    title: String,
    fact: Option<String>,
    start_input: Option<DateInput>,
    end_input: Option<DateInput>,
    status: Option<Status>,
    content: GalleryContent,
    detail: Option<Detail>,
}

impl Default for HtmlView {
    fn default() -> Self {
        Self::new("NASA Space Explorer")
    }
}

impl HtmlView {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            fact: None,
            start_input: None,
            end_input: None,
            status: None,
            content: GalleryContent::Empty,
            detail: None,
        }
    }

    pub fn with_fact(mut self, fact: impl Into<String>) -> Self {
        self.fact = Some(fact.into());
        self
    }

    pub fn set_date_fields(&mut self, start: &DateField, end: &DateField) {
        self.start_input = Some(start.into());
        self.end_input = Some(end.into());
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn card_count(&self) -> usize {
        match &self.content {
            GalleryContent::Cards(cards) => cards.len(),
            _ => 0,
        }
    }

    pub fn open_detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn render_document(&self) -> String {
        let markup = html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (self.title) }
                    style { (PreEscaped(STYLE)) }
                }
                body {
                    header {
                        h1 { (self.title) }
                        @if let Some(fact) = &self.fact {
                            p.fact.glass id="randomFact" { "Did you know? " (fact) }
                        }
                    }
                    section.filters {
                        (date_input("startDate", "Start date", self.start_input.as_ref()))
                        (date_input("endDate", "End date", self.end_input.as_ref()))
                    }
                    @if let Some(status) = &self.status {
                        p.status id="status" data-kind=(kind_name(status.kind)) { (status.message) }
                    } @else {
                        p.status id="status" {}
                    }
                    main.gallery id="gallery" {
                        @match &self.content {
                            GalleryContent::Empty => {}
                            GalleryContent::Placeholder(message) => {
                                div.placeholder.glass {
                                    div.placeholder-icon { "🛰️" }
                                    p { (message) }
                                }
                            }
                            GalleryContent::Cards(cards) => {
                                @for (index, card) in cards.iter().enumerate() {
                                    (card_markup(index, card))
                                }
                            }
                        }
                    }
                    @if let GalleryContent::Cards(cards) = &self.content {
                        @for (index, card) in cards.iter().enumerate() {
                            (detail_markup(&detail_id(index), &card.detail, false))
                        }
                    }
                    @if let Some(detail) = &self.detail {
                        (detail_markup("detail-open", detail, true))
                    }
                    script { (PreEscaped(SCRIPT)) }
                }
            }
        };

        markup.into_string()
    }
}

impl GalleryView for HtmlView {
    fn set_status(&mut self, status: Status) {
        self.status = Some(status);
    }

    fn clear_gallery(&mut self) {
        self.content = GalleryContent::Empty;
    }

    fn show_cards(&mut self, cards: Vec<Card>) {
        self.content = GalleryContent::Cards(cards);
    }

    fn show_placeholder(&mut self, message: &str) {
        self.content = GalleryContent::Placeholder(message.to_string());
    }

    fn show_detail(&mut self, detail: Detail) {
        self.detail = Some(detail);
    }

    fn hide_detail(&mut self) {
        self.detail = None;
    }
}

fn kind_name(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Info => "info",
        StatusKind::Loading => "loading",
        StatusKind::Success => "success",
        StatusKind::Error => "error",
    }
}

fn detail_id(index: usize) -> String {
    format!("detail-{}", index)
}

fn date_input(id: &str, label: &str, input: Option<&DateInput>) -> Markup {
    html! {
        label for=(id) { (label) }
        @if let Some(input) = input {
            input type="date" id=(id) value=[input.value.as_deref()] min=(input.min) max=(input.max) readonly;
        } @else {
            input type="date" id=(id) readonly;
        }
    }
}

fn card_markup(index: usize, card: &Card) -> Markup {
    let target = format!("#{}", detail_id(index));
    html! {
        article.card.glass data-key=(card.key.to_string()) {
            div.card__media {
                @match &card.media {
                    CardMedia::Image { src, alt } => {
                        a href=(target) { img loading="lazy" src=(src) alt=(alt); }
                    }
                    CardMedia::VideoThumbnail { src, alt } => {
                        a href=(target) { img loading="lazy" src=(src) alt=(alt); }
                    }
                    CardMedia::VideoLink { href } => {
                        a.link-out href=(href) target="_blank" rel="noopener" { "Open video" }
                    }
                }
                @if card.video_badge {
                    span.badge { "Video" }
                }
            }
            a.card__body href=(target) {
                h3.card__title { (card.title) }
                p.card__date { (card.date) }
            }
        }
    }
}

fn detail_markup(id: &str, detail: &Detail, open: bool) -> Markup {
    html! {
        section.modal.is-open[open] id=(id) role="dialog" aria-modal="true"
            aria-hidden=(if open { "false" } else { "true" }) data-key=(detail.key.to_string()) {
            a.modal__backdrop href="#gallery" data-close="backdrop" aria-label="Close" {}
            div.modal__content {
                a.modal__close href="#gallery" data-close="control" aria-label="Close" { "×" }
                div.modal__media {
                    @match &detail.media {
                        DetailMedia::Image { src, alt } => {
                            img src=(src) alt=(alt);
                        }
                        DetailMedia::Embed { src } => {
                            iframe src=(src) title=(detail.title) allowfullscreen {}
                        }
                        DetailMedia::Link { href } => {
                            a href=(href) target="_blank" rel="noopener" { "Open video" }
                        }
                    }
                }
                h2.modal__title { (detail.title) }
                p.modal__date { (detail.date) }
                @if let Some(credit) = &detail.copyright {
                    p.modal__credit { "© " (credit) }
                }
                p.modal__explanation { (detail.explanation) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gallery::{build_card, build_detail};
    use crate::core::{Entry, RawEntry};

    fn entry(title: &str, media_type: &str, url: &str) -> Entry {
        Entry::try_from(RawEntry {
            date: Some("2024-01-05".to_string()),
            title: Some(title.to_string()),
            explanation: Some("An explanation".to_string()),
            media_type: Some(media_type.to_string()),
            url: Some(url.to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_cards_render_with_detail_overlays() {
        let mut view = HtmlView::default();
        view.show_cards(vec![
            build_card(&entry("Galaxy", "image", "https://example.com/g.jpg")),
            build_card(&entry("Launch", "video", "https://youtu.be/abc123")),
        ]);
        let html = view.render_document();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("https://example.com/g.jpg"));
        assert!(html.contains("loading=\"lazy\""));
        assert!(html.contains("https://img.youtube.com/vi/abc123/hqdefault.jpg"));
        assert!(html.contains("https://www.youtube.com/embed/abc123"));
        assert!(html.contains(">Video</span>"));
        assert!(html.contains("id=\"detail-0\""));
        assert!(html.contains("id=\"detail-1\""));
        assert!(html.contains("January 5, 2024"));
        assert_eq!(view.card_count(), 2);
    }

    #[test]
    fn test_placeholder_and_status() {
        let mut view = HtmlView::default();
        view.set_status(Status::new(StatusKind::Success, "Loaded 0 items."));
        view.show_placeholder("No results for that date range.");
        let html = view.render_document();

        assert!(html.contains("No results for that date range."));
        assert!(html.contains("Loaded 0 items."));
        assert!(html.contains("data-kind=\"success\""));
        assert_eq!(view.card_count(), 0);
    }

    #[test]
    fn test_close_script_is_emitted() {
        let html = HtmlView::default().render_document();

        assert!(html.contains("function closeModal()"));
        assert!(html.contains("indexOf(\"#detail-\")"));
        assert!(html.contains("e.key===\"Escape\""));
        assert!(html.trim_end().ends_with("</script></body></html>"));
    }

    #[test]
    fn test_feed_text_is_escaped() {
        let mut view = HtmlView::default();
        view.show_cards(vec![build_card(&entry(
            "<script>alert(1)</script>",
            "image",
            "https://example.com/x.jpg",
        ))]);
        let html = view.render_document();

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn test_open_detail_is_visible_and_hides_again() {
        let mut view = HtmlView::default();
        view.show_detail(build_detail(&entry("Nebula", "image", "n.jpg")));
        assert_eq!(view.open_detail().map(|d| d.title.as_str()), Some("Nebula"));
        let html = view.render_document();
        assert!(html.contains("id=\"detail-open\""));
        assert!(html.contains("aria-hidden=\"false\""));

        view.hide_detail();
        assert!(view.open_detail().is_none());
        assert!(!view.render_document().contains("id=\"detail-open\""));
    }

    #[test]
    fn test_video_without_thumbnail_links_out() {
        let mut view = HtmlView::default();
        view.show_cards(vec![build_card(&entry("Clip", "video", "https://vimeo.com/1"))]);
        let html = view.render_document();

        assert!(html.contains("href=\"https://vimeo.com/1\""));
        assert!(html.contains("Open video"));
        assert!(html.contains(">Video</span>"));
    }
}
