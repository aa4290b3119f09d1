//! Display names to filesystem names.
//!
//! Every artifact of an app (bundle directory, icon, desktop entry) is named
//! after the slug of its `app_name`.

mod slug;

pub use slug::slugify;

/// Bytes reserved for suffixes appended to a slug (`.desktop`, `.part`, ...).
const SUFFIX_ROOM: usize = 32;

/// Linux NAME_MAX.
const NAME_MAX: usize = 255;

/// Longest slug we produce, so that `<slug>.desktop.part` still fits NAME_MAX.
pub const MAX_SLUG_BYTES: usize = NAME_MAX - SUFFIX_ROOM;

/// Slug for `name`, or `None` when nothing usable is left after sanitizing.
pub fn app_slug(name: &str) -> Option<String> {
    let slug = slugify(name);
    if slug.is_empty() {
        None
    } else {
        Some(slug)
    }
}

/// Desktop entry file name for a slug.
pub fn desktop_file_name(slug: &str) -> String {
    format!("{slug}.desktop")
}
