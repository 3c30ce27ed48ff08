use std::fmt::Write;

use crate::config::SiteConfig;
use crate::data::{MenuItem, Price, CURRENCY_SUFFIX};
use crate::group::{GroupingMode, MenuGroup};
use crate::view::{
    effects_script, js_string, Effect, MenuView, ScrollDirection, ViewState, CATEGORY_STRIP_ID,
    PAGE_ROOT_ID,
};

pub const UNAVAILABLE_MESSAGE: &str = "Menu unavailable";

fn html_escape(value: &str) -> String {
    v_htmlescape::escape(value).to_string()
}

const STYLE: &str = r#"
    html, body { margin: 0; height: 100%; font-family: ui-sans-serif, system-ui, sans-serif; }
    #menu-root { height: 100vh; overflow-y: auto; padding-bottom: 72px; box-sizing: border-box; }
    .header { background-color: rgb(60, 95, 136); padding: 24px 16px; display: flex; align-items: center; justify-content: center; }
    .header img { height: 96px; width: 96px; margin-right: 12px; }
    .header h1 { font-size: 3rem; font-family: monospace; color: rgb(220, 155, 33); margin: 0; }
    .strip { position: sticky; top: 0; z-index: 10; background: #fff; box-shadow: 0 2px 6px rgba(0,0,0,.15); }
    .strip .arrow { position: absolute; top: 0; bottom: 0; border: 0; padding: 0 16px; font-size: 1.5rem; cursor: pointer; }
    .strip .arrow.left { left: 0; background: linear-gradient(to right, #fff, transparent); }
    .strip .arrow.right { right: 0; background: linear-gradient(to left, #fff, transparent); }
    #categories { display: flex; overflow-x: auto; scrollbar-width: none; padding: 16px 32px; gap: 16px; }
    .category { white-space: nowrap; padding: 8px 24px; border-radius: 999px; border: 0; font-size: .875rem; cursor: pointer; background: #f3f4f6; color: #374151; }
    .category.selected { background: #f97316; color: #fff; }
    .items { min-height: 100vh; background-size: cover; background-position: center; background-attachment: fixed; }
    .items .shade { background: rgba(0,0,0,.4); padding: 32px 0; min-height: 100vh; }
    .group-header { text-align: center; margin: 24px 0; }
    .group-header h2 { display: inline-block; padding: 0 16px; color: #fff; background: rgba(0,0,0,.4); border-radius: 999px; font-size: 1.25rem; }
    .grid { display: grid; gap: 24px; padding: 0 16px; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); }
    .card { background: rgba(255,255,255,.95); border-radius: 8px; padding: 24px; display: flex; flex-direction: row-reverse; justify-content: space-between; align-items: flex-start; }
    .card .text { flex: 1; text-align: right; }
    .card h3 { margin: 0; font-size: 1.125rem; color: #111827; }
    .card p { margin: 8px 0 0; color: #4b5563; }
    .price { font-size: 1.25rem; color: #111827; margin-inline-start: 16px; }
    .unavailable { color: #fff; text-align: center; font-size: 1.5rem; }
    .footer { position: fixed; bottom: 0; left: 0; width: 100%; background-color: rgb(34, 42, 65); padding: 16px; box-sizing: border-box; display: flex; justify-content: space-between; align-items: center; }
    .footer a, .footer button { color: rgb(220, 155, 33); background: none; border: 0; font-weight: 500; cursor: pointer; text-decoration: none; }
"#;

/// Render the whole page for `state`.
pub fn render_page(site: &SiteConfig, state: &ViewState) -> String {
    let view = MenuView::from_state(state.clone());
    let mut html = String::new();

    html.push_str(
        "<!doctype html>\n<html lang=\"ar\">\n<head>\n  <meta charset=\"utf-8\">\n  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    let _ = writeln!(html, "  <title>{}</title>", html_escape(&site.name));
    let _ = writeln!(html, "  <style>{STYLE}</style>\n</head>\n<body>");
    let _ = writeln!(html, "<div id=\"{PAGE_ROOT_ID}\">");

    render_header(&mut html, site);
    render_strip(&mut html, &view);

    let _ = writeln!(
        html,
        "<div class=\"items\" style=\"background-image: url({})\">\n<div class=\"shade\">",
        html_escape(&js_string(&site.background))
    );
    if state.unavailable.is_some() {
        let _ = writeln!(
            html,
            "<p class=\"unavailable\">{}</p>",
            html_escape(UNAVAILABLE_MESSAGE)
        );
    } else if state.visible_items().is_some() {
        let _ = writeln!(html, "<div id=\"{}\">", html_escape(&state.selected));
        html.push_str(&render_groups(&state.visible_groups(), state.grouping_mode()));
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</div>\n");

    render_footer(&mut html, site, &view);

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_header(html: &mut String, site: &SiteConfig) {
    let _ = writeln!(
        html,
        "<div class=\"header\"><img src=\"{}\" alt=\"Restaurant Logo\"><h1>{}</h1></div>",
        html_escape(&site.logo),
        html_escape(&site.name)
    );
}

fn render_strip(html: &mut String, view: &MenuView) {
    let state = view.state();
    html.push_str("<div class=\"strip\">\n");
    let _ = writeln!(
        html,
        "<button class=\"arrow left\" onclick=\"{}\">‹</button>",
        html_escape(&effects_script(
            &view.scroll_categories(ScrollDirection::Left)
        ))
    );
    let _ = writeln!(html, "<div id=\"{CATEGORY_STRIP_ID}\">");
    for category in &state.menu.categories {
        let class = if *category == state.selected {
            "category selected"
        } else {
            "category"
        };
        let _ = writeln!(
            html,
            "<button class=\"{class}\" onclick=\"{}\">{}</button>",
            html_escape(&select_script(category)),
            html_escape(category)
        );
    }
    html.push_str("</div>\n");
    let _ = writeln!(
        html,
        "<button class=\"arrow right\" onclick=\"{}\">›</button>",
        html_escape(&effects_script(
            &view.scroll_categories(ScrollDirection::Right)
        ))
    );
    html.push_str("</div>\n");
}

/// Selecting a category reloads the page with the new selection, starting at
/// the top.
fn select_script(category: &str) -> String {
    format!(
        "{}; window.location.search = '?category=' + encodeURIComponent({})",
        Effect::ScrollToTop.script(),
        js_string(category)
    )
}

fn render_footer(html: &mut String, site: &SiteConfig, view: &MenuView) {
    html.push_str("<div class=\"footer\">\n<div class=\"socials\">\n");
    for social in &site.socials {
        let _ = writeln!(
            html,
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            html_escape(&social.url),
            html_escape(&social.name)
        );
    }
    html.push_str("</div>\n");
    for phone in &site.phones {
        let _ = writeln!(
            html,
            "<button class=\"phone\" onclick=\"{}\">&#x260E; <span>{}</span></button>",
            html_escape(&effects_script(&view.call_number(phone))),
            html_escape(phone)
        );
    }
    html.push_str("</div>\n");
}

/// Render groups of item cards, with a header over each labeled group.
pub fn render_groups(groups: &[MenuGroup<'_>], mode: GroupingMode) -> String {
    let mut html = String::new();
    for group in groups {
        html.push_str("<section class=\"group\">\n");
        if group.has_header(mode) {
            let _ = writeln!(
                html,
                "<div class=\"group-header\"><h2>{}</h2></div>",
                html_escape(group.category)
            );
        }
        html.push_str("<div class=\"grid\">\n");
        for item in &group.items {
            html.push_str(&render_item(item));
        }
        html.push_str("</div>\n</section>\n");
    }
    html
}

pub fn render_item(item: &MenuItem) -> String {
    let mut html = String::new();
    html.push_str("<div class=\"card\" dir=\"rtl\">\n<div class=\"text\">");
    let _ = write!(html, "<h3>{}</h3>", html_escape(&item.name));
    if let Some(description) = &item.description {
        let _ = write!(html, "<p>{}</p>", html_escape(description));
    }
    html.push_str("</div>\n");
    html.push_str(&render_price(&item.price));
    html.push_str("</div>\n");
    html
}

/// The price block: the special price alone, or each present tier on its own
/// line.
pub fn render_price(price: &Price) -> String {
    let mut html = String::from("<div class=\"price\">");
    for line in price.lines() {
        match line.tier {
            Some(tier) => {
                let _ = write!(
                    html,
                    "<div class=\"tier\" data-tier=\"{}\"><span>{}</span> <span>{} {CURRENCY_SUFFIX}</span></div>",
                    tier.english_name(),
                    tier.label(),
                    html_escape(line.amount)
                );
            }
            None => {
                let _ = write!(
                    html,
                    "<div class=\"special\" dir=\"rtl\"><span>{} {CURRENCY_SUFFIX}</span></div>",
                    html_escape(line.amount)
                );
            }
        }
    }
    html.push_str("</div>\n");
    html
}
