//! Banner layout.

use statbanner_core::CombinedStats;
use statbanner_delta::{BannerDeltas, Classification, DeltaResult, TrackedField};

use crate::{BANNER_HEIGHT, BANNER_WIDTH};

const BACKGROUND: &str = "#0d1117";
const LEFT_COLUMN_X: u32 = 60;
const RIGHT_COLUMN_X: u32 = 520;

/// Fill colour for a delta, or `None` when nothing should be drawn.
fn delta_color(classification: Classification) -> Option<&'static str> {
    match classification {
        Classification::Increase => Some("#3fb950"),
        Classification::Decrease => Some("#f85149"),
        Classification::New => Some("#58a6ff"),
        Classification::None => Some("#8b949e"),
        Classification::Unknown => None,
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// One headline column: label, big value, and the delta beside the value.
fn headline(x: u32, label: &str, value: u64, delta: &DeltaResult) -> String {
    let mut out = format!(
        "  <text x=\"{x}\" y=\"150\" class=\"txt small\">{label}</text>\n\
         \x20 <text x=\"{x}\" y=\"240\" class=\"txt big\">{value}\
         ",
        x = x,
        label = escape(label),
        value = value,
    );
    if let Some(color) = delta_color(delta.classification) {
        if !delta.display_text.is_empty() {
            out.push_str(&format!(
                "<tspan dx=\"24\" class=\"delta\" fill=\"{}\">{}</tspan>",
                color,
                escape(&delta.display_text)
            ));
        }
    }
    out.push_str("</text>\n");
    out
}

/// Build the banner SVG document.
pub fn build_svg(stats: &CombinedStats, deltas: &BannerDeltas) -> String {
    let mut svg = format!(
        "<svg width=\"{w}\" height=\"{h}\" xmlns=\"http://www.w3.org/2000/svg\">\n\
         \x20 <style>\n\
         \x20   .txt {{ font-family: 'Inter', sans-serif; fill: #fff }}\n\
         \x20   .big {{ font-size: 72px; font-weight: 700 }}\n\
         \x20   .small {{ font-size: 32px }}\n\
         \x20   .delta {{ font-size: 36px; font-weight: 400 }}\n\
         \x20 </style>\n\
         \x20 <rect width=\"{w}\" height=\"{h}\" fill=\"{bg}\"/>\n",
        w = BANNER_WIDTH,
        h = BANNER_HEIGHT,
        bg = BACKGROUND,
    );

    svg.push_str(&headline(
        LEFT_COLUMN_X,
        TrackedField::VimTotalSolutions.label(),
        stats.vim.total_solutions,
        &deltas.vim,
    ));
    svg.push_str(&headline(
        RIGHT_COLUMN_X,
        TrackedField::NewsTotalUsers.label(),
        stats.news.total_users,
        &deltas.news,
    ));

    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"380\" class=\"txt small\">Avg keys: {:.1}</text>\n",
        LEFT_COLUMN_X, stats.vim.average_keystrokes
    ));
    svg.push_str(&format!(
        "  <text x=\"{}\" y=\"380\" class=\"txt small\">Likes today: {}</text>\n",
        RIGHT_COLUMN_X, stats.news.likes_today
    ));
    svg.push_str("</svg>\n");
    svg
}
