//! In-memory model of the gallery page.
//!
//! Every element the page touches is a field of [`Page`]; handlers are
//! methods, so the whole flow can be driven without a browser.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::{
    apod::ApodSource,
    model::GalleryItem,
    range::{self, format_date, DateRange, MIN_DATE},
    render,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Listener {
    EscapeClosesModal,
}

/// Where a click inside the open modal landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    Backdrop,
    CloseButton,
    Content,
}

#[derive(Debug, Clone)]
pub struct Page {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    min_date: NaiveDate,
    max_date: NaiveDate,
    fetch_enabled: bool,
    clear_enabled: bool,
    range_error: String,
    wrapper: String,
    items: Vec<GalleryItem>,
    /// Indices of cards with a click handler attached.
    cards: Vec<usize>,
    modal_root: String,
    modal_item: Option<usize>,
    body_scroll_locked: bool,
    keydown: HashSet<Listener>,
    fact: String,
}

impl Page {
    pub fn new(today: NaiveDate, fact: impl Into<String>) -> Self {
        let range = DateRange::default_for(today);

        Self {
            start: Some(range.start()),
            end: Some(range.end()),
            min_date: MIN_DATE,
            max_date: today,
            fetch_enabled: true,
            clear_enabled: false,
            range_error: String::new(),
            wrapper: String::new(),
            items: Vec::new(),
            cards: Vec::new(),
            modal_root: String::new(),
            modal_item: None,
            body_scroll_locked: false,
            keydown: HashSet::new(),
            fact: fact.into(),
        }
    }

    pub fn set_start(&mut self, start: Option<NaiveDate>) {
        self.start = start;
        self.on_range_input();
    }

    pub fn set_end(&mut self, end: Option<NaiveDate>) {
        self.end = end;
        self.on_range_input();
    }

    fn on_range_input(&mut self) {
        self.fetch_enabled = range::is_valid(self.start, self.end);
        self.range_error.clear();
    }

    pub fn set_fact(&mut self, fact: impl Into<String>) {
        self.fact = fact.into();
    }

    /// Sends one request for the selected range and renders the outcome.
    /// Nothing is requested when the range is invalid.
    pub async fn fetch(&mut self, source: &dyn ApodSource) {
        let range = match range::validate(self.start, self.end) {
            Ok(x) => x,
            Err(err) => {
                tracing::debug!("range: {err}");
                self.range_error = render::RANGE_ERROR_TEXT.to_owned();
                return;
            }
        };

        self.close_modal();
        self.items.clear();
        self.cards.clear();
        self.wrapper = render::loading();

        match source.fetch(range).await {
            Ok(items) => self.render_gallery(items),
            Err(err) => {
                tracing::error!("fetch {} ~ {}: {err}", range.start(), range.end());
                self.wrapper = render::failure();
            }
        }
    }

    pub fn render_gallery(&mut self, items: Vec<GalleryItem>) {
        // the old cards are gone, so is any modal opened from them
        self.close_modal();

        if items.is_empty() {
            self.items.clear();
            self.cards.clear();
            self.wrapper = render::empty();
            return;
        }

        self.wrapper = render::gallery(&items);
        self.cards = (0..items.len()).collect();
        self.items = items;
        self.clear_enabled = true;
    }

    /// Returns whether a modal opened.
    pub fn click_card(&mut self, idx: usize) -> bool {
        if self.cards.contains(&idx) {
            self.open_modal(idx)
        } else {
            false
        }
    }

    pub fn open_modal(&mut self, idx: usize) -> bool {
        let Some(item) = self.items.get(idx) else {
            return false;
        };

        self.modal_root = render::modal(item);
        self.modal_item = Some(idx);
        self.body_scroll_locked = true;
        self.keydown.insert(Listener::EscapeClosesModal);

        true
    }

    pub fn close_modal(&mut self) {
        self.modal_root.clear();
        self.modal_item = None;
        self.body_scroll_locked = false;
        self.keydown.remove(&Listener::EscapeClosesModal);
    }

    pub fn key_down(&mut self, key: &str) {
        if key == "Escape" && self.keydown.contains(&Listener::EscapeClosesModal) {
            self.close_modal();
        }
    }

    pub fn click_modal(&mut self, target: ModalTarget) {
        match target {
            ModalTarget::Backdrop | ModalTarget::CloseButton => self.close_modal(),
            ModalTarget::Content => {}
        }
    }

    /// Back to the initial state for `today`.
    pub fn clear(&mut self, today: NaiveDate) {
        let range = DateRange::default_for(today);

        self.wrapper.clear();
        self.items.clear();
        self.cards.clear();
        self.start = Some(range.start());
        self.end = Some(range.end());
        self.max_date = today;
        self.fetch_enabled = true;
        self.clear_enabled = false;
        self.range_error.clear();
        self.close_modal();
    }

    pub fn export(&self) -> String {
        let start = self.start.map(format_date).unwrap_or_default();
        let end = self.end.map(format_date).unwrap_or_default();
        let min_date = format_date(self.min_date);
        let max_date = format_date(self.max_date);

        render::document(render::DocumentParts {
            start: &start,
            end: &end,
            min_date: &min_date,
            max_date: &max_date,
            range_error: &self.range_error,
            fact: &self.fact,
            wrapper: &self.wrapper,
            items: &self.items,
        })
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }

    pub fn fetch_enabled(&self) -> bool {
        self.fetch_enabled
    }

    pub fn clear_enabled(&self) -> bool {
        self.clear_enabled
    }

    pub fn range_error(&self) -> &str {
        &self.range_error
    }

    pub fn wrapper(&self) -> &str {
        &self.wrapper
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn cards(&self) -> &[usize] {
        &self.cards
    }

    pub fn modal_root(&self) -> &str {
        &self.modal_root
    }

    pub fn modal_item(&self) -> Option<&GalleryItem> {
        self.modal_item.and_then(|idx| self.items.get(idx))
    }

    /// Fragment that shows the open modal in the exported file.
    pub fn modal_anchor(&self) -> Option<String> {
        self.modal_item.map(render::modal_anchor)
    }

    pub fn body_scroll_locked(&self) -> bool {
        self.body_scroll_locked
    }

    pub fn keydown_listeners(&self) -> usize {
        self.keydown.len()
    }

    pub fn fact(&self) -> &str {
        &self.fact
    }
}
