//! HTML rendering of album pages and the overview.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating;
//! every interpolated value is escaped. Both renderers are pure: all
//! filesystem decisions (thumbnail or original) were made during path
//! resolution, so the same inputs always produce byte-identical output.
//!
//! ## Album Page
//!
//! ```text
//! header            site title + nav links
//! main.card
//!   h2              album title
//!   div.gallery-grid
//!     a.gallery-item[href=full] > img[src=display]   (one per image, in order)
//!   div.back-link   link to the overview
//! div#lightbox      empty viewer markup driven by the script
//! script[src]       lightbox asset
//! ```
//!
//! ## Overview
//!
//! One `section.album` per album: title and a cover image linking to the
//! album page. An album without a cover shows the configured fallback image.

use crate::config::SiteConfig;
use crate::types::{GalleryEntry, OverviewSection};
use maud::{DOCTYPE, Markup, html};

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(site: &SiteConfig, page_title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width,initial-scale=1";
                title { (site.title) " - " (page_title) }
                link rel="stylesheet" href=(site.stylesheet);
            }
            body {
                (content)
            }
        }
    }
}

/// Renders the fixed site header with navigation links
fn site_header(site: &SiteConfig) -> Markup {
    html! {
        header {
            h1 { (site.title) }
            nav {
                @for link in &site.nav {
                    a href=(link.href) { (link.label) }
                }
            }
        }
    }
}

/// Empty lightbox shell; the script fills in the image on click.
fn lightbox() -> Markup {
    html! {
        div id="lightbox" class="lightbox" aria-hidden="true" {
            div.inner {
                img src="" alt="";
                div.nav {
                    button id="lb-prev" type="button" { "\u{25c0}" }
                    button id="lb-next" type="button" { "\u{25b6}" }
                }
                button id="lb-close" class="close" type="button" aria-label="Close" { "\u{00d7}" }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders one album page.
///
/// `overview` is the overview page file name, used for the back-link.
pub fn album_page(
    site: &SiteConfig,
    overview: &str,
    title: &str,
    entries: &[GalleryEntry],
) -> Markup {
    let content = html! {
        (site_header(site))
        div.site {
            main.card {
                h2 { (title) }
                div.gallery-grid {
                    @for entry in entries {
                        a.gallery-item href=(entry.full) {
                            img src=(entry.display) alt="" loading="lazy";
                        }
                    }
                }
                div.back-link {
                    a href={ "./" (overview) } { (site.back_link) }
                }
            }
        }
        (lightbox())
        script src=(site.script) {}
    };

    base_document(site, title, content)
}

/// Renders the overview page linking every album page.
pub fn overview_page(site: &SiteConfig, sections: &[OverviewSection]) -> Markup {
    let content = html! {
        (site_header(site))
        div.site {
            main.card {
                h2 { (site.overview_heading) }
                @for album in sections {
                    @let cover = album.cover.as_deref().unwrap_or(&site.fallback_cover);
                    section.album {
                        div.info { h3 { (album.title) } }
                        a href={ "./" (album.page) } {
                            img src=(cover) alt=(album.title);
                        }
                    }
                }
            }
        }
    };

    base_document(site, &site.overview_heading, content)
}
