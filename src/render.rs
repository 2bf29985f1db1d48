//! HTML templates for the gallery page.

use itertools::Itertools;

use crate::{
    media::{MediaInfo, Presentation},
    model::GalleryItem,
};

pub const LOADING_TEXT: &str = "Loading space photos…";
pub const FAILURE_TEXT: &str = "Failed to load NASA images. Please try again later.";
pub const EMPTY_TEXT: &str = "No results.";
pub const RANGE_ERROR_TEXT: &str = "Please select a valid date range.";

const YOUTUBE_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";

pub fn loading() -> String {
    format!(
        r#"
    <div class="loading">
        <div class="spinner"></div>
        <p>{}</p>
    </div>"#,
        LOADING_TEXT
    )
}

pub fn failure() -> String {
    format!(r#"<p class="message error">{}</p>"#, FAILURE_TEXT)
}

pub fn empty() -> String {
    format!(r#"<p class="message">{}</p>"#, EMPTY_TEXT)
}

/// The gallery section, or [`empty`] when there is nothing to show.
pub fn gallery(items: &[GalleryItem]) -> String {
    if items.is_empty() {
        return empty();
    }

    let cards = items
        .iter()
        .enumerate()
        .map(|(idx, item)| card(item, idx))
        .join("");

    format!(
        r#"
    <section class="gallery">
        <h2>Cosmic Gallery</h2>
        <div class="grid">
            {}
        </div>
    </section>"#,
        cards
    )
}

pub fn card(item: &GalleryItem, idx: usize) -> String {
    let info = MediaInfo::classify(item);
    let title = html_escape(&item.title);

    let figure = match &info.presentation {
        Presentation::Image => format!(r#"<img src="{}" alt="{}">"#, html_escape(&item.url), title),
        Presentation::YouTube { .. } | Presentation::Video => format!(
            r#"<img class="thumb" src="{}" alt="{}">
                <div class="play">▶</div>
                <div class="media-badge">{}</div>"#,
            html_escape(info.thumbnail_url.as_deref().unwrap_or_default()),
            title,
            info.label()
        ),
    };

    format!(
        r##"
        <a class="card" href="#{}" data-idx="{}">
            <figure>
                {}
            </figure>
            <div class="info">
                <h3>{}</h3>
                <p>{}</p>
            </div>
        </a>"##,
        modal_anchor(idx),
        idx,
        figure,
        title,
        item.display_date()
    )
}

/// Modal for the live page, where a keydown listener handles Escape.
pub fn modal(item: &GalleryItem) -> String {
    modal_with_footer(item, "Press <kbd>ESC</kbd> to close")
}

/// Modal for the exported file, which has no keyboard handling.
pub fn static_modal(item: &GalleryItem) -> String {
    modal_with_footer(item, "Select × to close")
}

fn modal_with_footer(item: &GalleryItem, footer: &str) -> String {
    let info = MediaInfo::classify(item);
    let title = html_escape(&item.title);

    let media = match &info.presentation {
        Presentation::Image => format!(
            r#"<img src="{}" alt="{}">"#,
            html_escape(item.full_image_url()),
            title
        ),
        Presentation::YouTube { .. } => format!(
            r#"<iframe src="{}" title="{}" allowfullscreen frameborder="0" allow="{}"></iframe>"#,
            html_escape(info.embed_url.as_deref().unwrap_or_default()),
            title,
            YOUTUBE_ALLOW
        ),
        Presentation::Video => format!(
            r#"<iframe src="{}" title="{}" allowfullscreen frameborder="0"></iframe>"#,
            html_escape(&item.url),
            title
        ),
    };

    let youtube_marker = if info.is_youtube() {
        r#"<p class="youtube-marker">📺 YouTube Video</p>"#
    } else {
        ""
    };

    let copyright = item
        .copyright
        .as_deref()
        .map(|x| format!(r#"<p class="copyright">© {}</p>"#, html_escape(x)))
        .unwrap_or_default();

    format!(
        r##"
    <div class="modal-backdrop" role="dialog" aria-modal="true">
        <div class="modal">
            <header>
                <h2 title="{}">{}</h2>
                <a class="close" href="#" aria-label="Close">×</a>
            </header>
            <div class="media">
                {}
            </div>
            <div class="body">
                <p class="date">{}</p>
                {}
                <p>{}</p>
                {}
            </div>
            <footer>{}</footer>
        </div>
    </div>"##,
        title,
        title,
        media,
        item.display_date(),
        youtube_marker,
        html_escape(&item.explanation),
        copyright,
        footer
    )
}

pub fn modal_anchor(idx: usize) -> String {
    format!("item-{idx}")
}

/// Everything the exported document needs from the page.
#[derive(Debug, Clone, Copy)]
pub struct DocumentParts<'a> {
    pub start: &'a str,
    pub end: &'a str,
    pub min_date: &'a str,
    pub max_date: &'a str,
    pub range_error: &'a str,
    pub fact: &'a str,
    pub wrapper: &'a str,
    pub items: &'a [GalleryItem],
}

/// Standalone page. Each item's modal is addressable by `#item-N` and shown
/// only while targeted, so the viewer works without scripting.
pub fn document(parts: DocumentParts<'_>) -> String {
    let modals = parts
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            format!(
                r#"<div class="modal-target" id="{}">{}</div>"#,
                modal_anchor(idx),
                static_modal(item)
            )
        })
        .join("\n");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>NASA Space Explorer</title>
    <style>{}</style>
</head>
<body>
    <header>
        <h1>NASA Space Explorer</h1>
        <form class="range">
            <input type="date" id="start" value="{}" min="{}" max="{}">
            <input type="date" id="end" value="{}" min="{}" max="{}">
        </form>
        <p id="range-error">{}</p>
    </header>
    <aside class="fact"><strong>Did you know?</strong> <span id="fact-text">{}</span></aside>
    <main id="gallery-wrapper">{}</main>
    <div class="modals">
{}
    </div>
</body>
</html>"#,
        CSS,
        parts.start,
        parts.min_date,
        parts.max_date,
        parts.end,
        parts.min_date,
        parts.max_date,
        html_escape(parts.range_error),
        html_escape(parts.fact),
        parts.wrapper,
        modals
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub const CSS: &str = r#"
:root {
    --nasa-blue: #0b3d91;
    --nasa-red: #fc3d21;
    --grey-600: #555;
}
body { margin: 0; font-family: Helvetica, Arial, sans-serif; background: #f5f6f8; color: #222; }
header { background: var(--nasa-blue); color: #fff; padding: 1rem 2rem; }
#range-error { color: var(--nasa-red); min-height: 1em; }
.fact { margin: 1rem 2rem; padding: .75rem 1rem; background: #fff; border-left: 4px solid var(--nasa-red); }
.message { padding: 3rem 1rem; text-align: center; }
.message.error { color: #c00; }
.loading { text-align: center; padding: 3rem 1rem; }
.gallery { padding: 1rem 2rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }
.card { display: block; background: #fff; color: inherit; text-decoration: none; border-radius: 6px; overflow: hidden; }
.card figure { position: relative; margin: 0; aspect-ratio: 4 / 3; background: #000; }
.card img { width: 100%; height: 100%; object-fit: cover; }
.card .play { position: absolute; inset: 0; display: grid; place-items: center; font-size: 3rem; color: #fff; }
.card .media-badge { position: absolute; top: .5rem; right: .5rem; background: var(--nasa-red); color: #fff; padding: .1rem .5rem; border-radius: 3px; font-size: .75rem; }
.card .info { padding: .75rem 1rem; }
.modal-target { display: none; }
.modal-target:target { display: block; }
.modal-backdrop { position: fixed; inset: 0; background: rgba(0, 0, 0, .75); display: grid; place-items: center; }
.modal { background: #fff; max-width: 900px; width: 92vw; max-height: 92vh; overflow: auto; border-radius: 6px; }
.modal header { display: flex; justify-content: space-between; align-items: center; }
.modal .close { color: #fff; text-decoration: none; font-size: 1.5rem; }
.modal .media img, .modal .media iframe { width: 100%; aspect-ratio: 16 / 9; border: 0; }
.modal .body { padding: 1rem 2rem; }
.modal .date { color: var(--grey-600); margin-bottom: .5rem; }
.youtube-marker { color: var(--nasa-blue); font-weight: 600; margin-bottom: .5rem; }
.modal footer { padding: .5rem 2rem 1rem; color: var(--grey-600); font-size: .85rem; }
"#;
