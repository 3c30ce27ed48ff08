//! View state and the user-facing operations of the menu page.
//!
//! State only changes through [`ViewState::reduce`]. Operations that touch the
//! outside world return [`Effect`]s, which a [`Platform`] carries out.

use std::sync::Arc;

use crate::data::{MenuData, MenuItem};
use crate::group::{group_items, GroupingMode, MenuGroup};
use crate::provider::MenuProvider;

/// Distance the category strip moves per arrow click.
pub const CATEGORY_SCROLL_STEP: i32 = 200;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub menu: Arc<MenuData>,
    pub selected: String,
    /// Set when the menu could not be fetched.
    pub unavailable: Option<String>,
}

#[derive(Debug, Clone)]
pub enum Event {
    DataLoaded(Result<Arc<MenuData>, String>),
    CategorySelected(String),
}

impl ViewState {
    pub fn reduce(self, event: Event) -> ViewState {
        match event {
            Event::DataLoaded(Ok(menu)) => {
                let selected = menu
                    .categories
                    .first()
                    .cloned()
                    .unwrap_or(self.selected);
                tracing::debug!(selected = %selected, "menu data loaded");
                ViewState {
                    menu,
                    selected,
                    unavailable: None,
                }
            }
            Event::DataLoaded(Err(reason)) => {
                tracing::debug!(%reason, "menu data unavailable");
                ViewState {
                    unavailable: Some(reason),
                    ..self
                }
            }
            Event::CategorySelected(selected) => {
                tracing::debug!(selected = %selected, "category selected");
                ViewState { selected, ..self }
            }
        }
    }

    pub fn grouping_mode(&self) -> GroupingMode {
        GroupingMode::for_category(&self.selected)
    }

    /// Items of the selected category, if there are any to render.
    pub fn visible_items(&self) -> Option<&[MenuItem]> {
        if self.selected.is_empty() {
            return None;
        }
        self.menu.items_of(&self.selected)
    }

    pub fn visible_groups(&self) -> Vec<MenuGroup<'_>> {
        match self.visible_items() {
            Some(items) => group_items(items, self.grouping_mode()),
            None => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

impl ScrollDirection {
    pub fn offset(self) -> i32 {
        match self {
            Self::Left => -CATEGORY_SCROLL_STEP,
            Self::Right => CATEGORY_SCROLL_STEP,
        }
    }
}

/// A side effect requested by the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Smoothly scroll the category strip horizontally.
    ScrollCategories { offset: i32 },
    /// Jump the page back to the top.
    ScrollToTop,
    CopyToClipboard(String),
    Navigate(String),
}

/// Element ids the browser scripts of [`Effect`] address.
pub const CATEGORY_STRIP_ID: &str = "categories";
pub const PAGE_ROOT_ID: &str = "menu-root";

impl Effect {
    /// The effect as a browser script, for use in an event handler attribute.
    pub fn script(&self) -> String {
        match self {
            Self::ScrollCategories { offset } => format!(
                "document.getElementById('{CATEGORY_STRIP_ID}').scrollBy({{left: {offset}, behavior: 'smooth'}})"
            ),
            Self::ScrollToTop => {
                format!("document.getElementById('{PAGE_ROOT_ID}').scrollTo(0, 0)")
            }
            Self::CopyToClipboard(text) => format!(
                "try {{ navigator.clipboard.writeText({}).catch(function () {{}}) }} catch (e) {{}}",
                js_string(text)
            ),
            Self::Navigate(target) => format!("window.location.href = {}", js_string(target)),
        }
    }
}

/// Quote `value` as a script string literal.
pub fn js_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Joins effect scripts into one handler body.
pub fn effects_script(effects: &[Effect]) -> String {
    effects
        .iter()
        .map(Effect::script)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Carries out effects in some environment.
pub trait Platform {
    fn perform(&mut self, effect: &Effect) -> anyhow::Result<()>;
}

pub struct MenuView {
    state: ViewState,
}

impl MenuView {
    pub fn new() -> Self {
        Self {
            state: ViewState::default(),
        }
    }

    pub fn from_state(state: ViewState) -> Self {
        Self { state }
    }

    /// Fetch the menu once and apply it.
    pub async fn mount<P: MenuProvider>(provider: &P) -> Self {
        let result = provider.fetch_menu_data().await;
        if let Err(e) = &result {
            tracing::error!("fail to fetch menu: {e:#}");
        }
        let mut view = Self::new();
        view.apply(Event::DataLoaded(
            result.map(Arc::new).map_err(|e| format!("{e:#}")),
        ));
        view
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    fn apply(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(event);
    }

    pub fn scroll_categories(&self, direction: ScrollDirection) -> Vec<Effect> {
        vec![Effect::ScrollCategories {
            offset: direction.offset(),
        }]
    }

    /// No check is made that `category` exists; an unknown one renders nothing.
    pub fn select_category(&mut self, category: impl Into<String>) -> Vec<Effect> {
        self.apply(Event::CategorySelected(category.into()));
        vec![Effect::ScrollToTop]
    }

    pub fn call_number(&self, number: &str) -> Vec<Effect> {
        vec![
            Effect::CopyToClipboard(number.to_string()),
            Effect::Navigate(format!("tel:{number}")),
        ]
    }

    /// Perform `effects` in order. A failing effect is logged and skipped, so a
    /// clipboard failure never blocks the call navigation after it.
    pub fn dispatch<P: Platform>(platform: &mut P, effects: &[Effect]) {
        for effect in effects {
            if let Err(e) = platform.perform(effect) {
                tracing::warn!(?effect, "effect failed: {e:#}");
            }
        }
    }
}

impl Default for MenuView {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Price;
    use crate::provider::StaticProvider;

    fn item(name: &str, category: &str) -> MenuItem {
        MenuItem::new(name, category, Price::Special("1".into()))
    }

    fn sample() -> MenuData {
        let mut data = MenuData::default();
        data.categories = vec!["Drinks".into(), "Mains".into()];
        data.items.insert("Drinks".into(), vec![item("itemA", "Drinks")]);
        data.items.insert("Mains".into(), vec![item("itemB", "Mains")]);
        data
    }

    fn visible_names(view: &MenuView) -> Vec<String> {
        view.state()
            .visible_groups()
            .iter()
            .flat_map(|g| g.items.iter().map(|i| i.name.clone()))
            .collect()
    }

    #[derive(Default)]
    struct Recorder {
        clipboard_fails: bool,
        performed: Vec<Effect>,
    }

    impl Platform for Recorder {
        fn perform(&mut self, effect: &Effect) -> anyhow::Result<()> {
            self.performed.push(effect.clone());
            if self.clipboard_fails && matches!(effect, Effect::CopyToClipboard(_)) {
                anyhow::bail!("clipboard denied");
            }
            Ok(())
        }
    }

    #[test]
    fn data_loaded_selects_first_category() {
        let state = ViewState::default().reduce(Event::DataLoaded(Ok(Arc::new(sample()))));
        assert_eq!(state.selected, "Drinks");
        assert!(state.unavailable.is_none());
    }

    #[test]
    fn empty_data_keeps_selection_empty() {
        let state =
            ViewState::default().reduce(Event::DataLoaded(Ok(Arc::new(MenuData::default()))));
        assert_eq!(state.selected, "");
        assert!(state.visible_groups().is_empty());
    }

    #[test]
    fn failed_load_marks_unavailable() {
        let state = ViewState::default().reduce(Event::DataLoaded(Err("offline".into())));
        assert_eq!(state.unavailable.as_deref(), Some("offline"));
        assert!(state.menu.categories.is_empty());
    }

    #[test]
    fn unknown_category_renders_nothing() {
        let state = ViewState::default()
            .reduce(Event::DataLoaded(Ok(Arc::new(sample()))))
            .reduce(Event::CategorySelected("Desserts".into()));
        assert_eq!(state.selected, "Desserts");
        assert!(state.visible_groups().is_empty());
    }

    #[tokio::test]
    async fn selecting_switches_items_and_resets_scroll() {
        let mut view = MenuView::mount(&StaticProvider::new(sample())).await;
        assert_eq!(visible_names(&view), vec!["itemA"]);

        let effects = view.select_category("Mains");
        assert_eq!(effects, vec![Effect::ScrollToTop]);
        assert_eq!(visible_names(&view), vec!["itemB"]);
    }

    #[tokio::test]
    async fn all_groups_by_item_category() {
        let mut data = sample();
        data.categories.insert(0, "All".into());
        data.items.insert(
            "All".into(),
            vec![item("a", "Grill"), item("b", "Drinks"), item("c", "Grill")],
        );
        let view = MenuView::mount(&StaticProvider::new(data)).await;
        assert_eq!(view.state().grouping_mode(), GroupingMode::ByItemCategory);

        let groups = view.state().visible_groups();
        let categories: Vec<&str> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Grill", "Drinks"]);
        assert!(groups.iter().all(|g| g.has_header(GroupingMode::ByItemCategory)));
    }

    #[test]
    fn scroll_offsets() {
        let view = MenuView::new();
        assert_eq!(
            view.scroll_categories(ScrollDirection::Left),
            vec![Effect::ScrollCategories { offset: -200 }]
        );
        assert_eq!(
            view.scroll_categories(ScrollDirection::Right),
            vec![Effect::ScrollCategories { offset: 200 }]
        );
    }

    #[test]
    fn call_navigates_even_if_clipboard_fails() {
        let view = MenuView::new();
        let effects = view.call_number("01144435111");

        let mut platform = Recorder {
            clipboard_fails: true,
            ..Default::default()
        };
        MenuView::dispatch(&mut platform, &effects);

        assert_eq!(
            platform.performed,
            vec![
                Effect::CopyToClipboard("01144435111".into()),
                Effect::Navigate("tel:01144435111".into()),
            ]
        );
    }

    #[test]
    fn scripts_quote_their_arguments() {
        let script = Effect::CopyToClipboard("0114\"4435111".into()).script();
        assert!(script.contains(r#"writeText("0114\"4435111")"#));
        assert_eq!(
            Effect::Navigate("tel:+20".into()).script(),
            r#"window.location.href = "tel:+20""#
        );
        assert!(Effect::ScrollCategories { offset: -200 }
            .script()
            .contains("scrollBy({left: -200, behavior: 'smooth'})"));
    }
}
