//! Text-on-card SVG icons.
//!
//! Icons are drawn locally from the app URL: a 512×512 rounded white card
//! with a rounded black square and a white label. Local servers are labeled
//! with their port (`:8080`), everything else with its host name.

use url::{Host, Url};

const CANVAS_SIZE: u32 = 512;
const CARD_RADIUS: u32 = 96;
const CARD_BORDER: u32 = 4;
const CARD_BORDER_COLOR: &str = "#e1e1e1";
const ICON_SIZE: u32 = 480;

/// Max font size as a fraction of the inner square.
const FONT_FRACTION: f32 = 0.35;
/// Rough average glyph advance in em for sans-serif text.
const GLYPH_ADVANCE_EM: f32 = 0.6;

/// Label drawn on the icon for `url`.
pub fn label_for_url(url: &Url) -> String {
    match url.host() {
        Some(Host::Domain(d)) if d.eq_ignore_ascii_case("localhost") => port_label(url),
        Some(Host::Ipv4(ip)) if ip.is_loopback() => port_label(url),
        Some(Host::Ipv6(ip)) if ip.is_loopback() => port_label(url),
        Some(Host::Domain(d)) => d.strip_prefix("www.").unwrap_or(d).to_string(),
        Some(Host::Ipv4(ip)) => ip.to_string(),
        Some(Host::Ipv6(ip)) => ip.to_string(),
        None => "HTTP".to_string(),
    }
}

fn port_label(url: &Url) -> String {
    match url.port_or_known_default() {
        Some(port) => format!(":{port}"),
        None => "localhost".to_string(),
    }
}

/// Renders the card icon with `label` centered on it.
pub fn render_card_svg(label: &str) -> String {
    let size = CANVAS_SIZE;
    let half_border = CARD_BORDER / 2;
    let card_extent = size - CARD_BORDER;

    let inset = CANVAS_SIZE - ICON_SIZE - 16;
    let inner = CANVAS_SIZE - 2 * inset;
    let inner_radius = CARD_RADIUS * ICON_SIZE / CANVAS_SIZE;

    let font_size = font_size_for(label, inner);
    let center = size / 2;

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">
  <rect x="{half_border}" y="{half_border}" width="{card_extent}" height="{card_extent}" rx="{CARD_RADIUS}" fill="#ffffff" stroke="{CARD_BORDER_COLOR}" stroke-width="{CARD_BORDER}"/>
  <rect x="{inset}" y="{inset}" width="{inner}" height="{inner}" rx="{inner_radius}" fill="#000000"/>
  <text x="{center}" y="{center}" fill="#ffffff" font-family="sans-serif" font-weight="bold" font-size="{font_size}" text-anchor="middle" dominant-baseline="central">{text}</text>
</svg>
"##,
        text = xml_escape(label),
    )
}

fn font_size_for(label: &str, inner: u32) -> u32 {
    let max = inner as f32 * FONT_FRACTION;
    let chars = label.chars().count().max(1) as f32;
    let fit = inner as f32 * 0.9 / (chars * GLYPH_ADVANCE_EM);
    max.min(fit).floor().max(12.0) as u32
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
