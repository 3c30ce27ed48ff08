use std::collections::HashMap;

use serde::Serialize;

use crate::data::{MenuItem, ALL_CATEGORY};

/// How the item list of the selected category is split into groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupingMode {
    /// Trust the provider's grouping: one unlabeled group.
    ByProvidedCategory,
    /// Re-group by each item's own `category` field and label the groups.
    ByItemCategory,
}

impl GroupingMode {
    pub fn for_category(selected: &str) -> Self {
        if selected == ALL_CATEGORY {
            Self::ByItemCategory
        } else {
            Self::ByProvidedCategory
        }
    }

    pub fn shows_headers(self) -> bool {
        matches!(self, Self::ByItemCategory)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MenuGroup<'a> {
    pub category: &'a str,
    pub items: Vec<&'a MenuItem>,
}

impl MenuGroup<'_> {
    /// Whether a header line is drawn above this group.
    pub fn has_header(&self, mode: GroupingMode) -> bool {
        mode.shows_headers() && !self.category.is_empty()
    }
}

/// Split `items` into groups. Grouping is stable: groups appear in the order
/// their category is first seen and items keep their input order.
pub fn group_items(items: &[MenuItem], mode: GroupingMode) -> Vec<MenuGroup<'_>> {
    match mode {
        GroupingMode::ByProvidedCategory => vec![MenuGroup {
            category: "",
            items: items.iter().collect(),
        }],
        GroupingMode::ByItemCategory => {
            let mut groups: Vec<MenuGroup<'_>> = Vec::new();
            let mut index: HashMap<&str, usize> = HashMap::new();
            for item in items {
                let slot = *index.entry(item.category.as_str()).or_insert_with(|| {
                    groups.push(MenuGroup {
                        category: item.category.as_str(),
                        items: Vec::new(),
                    });
                    groups.len() - 1
                });
                groups[slot].items.push(item);
            }
            groups
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Price;
    use proptest::prelude::*;

    fn item(name: &str, category: &str) -> MenuItem {
        MenuItem::new(name, category, Price::Special("1".into()))
    }

    #[test]
    fn all_selects_item_category_mode() {
        assert_eq!(GroupingMode::for_category("All"), GroupingMode::ByItemCategory);
        assert_eq!(
            GroupingMode::for_category("Drinks"),
            GroupingMode::ByProvidedCategory
        );
        assert_eq!(GroupingMode::for_category(""), GroupingMode::ByProvidedCategory);
    }

    #[test]
    fn regroups_by_item_category() {
        let items = vec![
            item("a", "Grill"),
            item("b", "Drinks"),
            item("c", "Grill"),
            item("d", ""),
        ];
        let groups = group_items(&items, GroupingMode::ByItemCategory);
        let shape: Vec<(&str, Vec<&str>)> = groups
            .iter()
            .map(|g| (g.category, g.items.iter().map(|i| i.name.as_str()).collect()))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("Grill", vec!["a", "c"]),
                ("Drinks", vec!["b"]),
                ("", vec!["d"]),
            ]
        );
        assert!(groups[0].has_header(GroupingMode::ByItemCategory));
        assert!(!groups[2].has_header(GroupingMode::ByItemCategory));
    }

    #[test]
    fn empty_input() {
        assert!(group_items(&[], GroupingMode::ByItemCategory).is_empty());
        let single = group_items(&[], GroupingMode::ByProvidedCategory);
        assert_eq!(single.len(), 1);
        assert!(single[0].items.is_empty());
    }

    fn arb_items() -> impl Strategy<Value = Vec<MenuItem>> {
        prop::collection::vec(("[a-z]{1,6}", prop::sample::select(vec!["A", "B", "C", ""])), 0..24)
            .prop_map(|pairs| pairs.into_iter().map(|(n, c)| item(&n, c)).collect())
    }

    proptest! {
        #[test]
        fn provided_mode_is_one_group_in_order(items in arb_items()) {
            let groups = group_items(&items, GroupingMode::ByProvidedCategory);
            prop_assert_eq!(groups.len(), 1);
            let flat: Vec<&MenuItem> = items.iter().collect();
            prop_assert_eq!(&groups[0].items, &flat);
            prop_assert!(!groups[0].has_header(GroupingMode::ByProvidedCategory));
        }

        #[test]
        fn item_mode_is_stable_partition(items in arb_items()) {
            let groups = group_items(&items, GroupingMode::ByItemCategory);

            let total: usize = groups.iter().map(|g| g.items.len()).sum();
            prop_assert_eq!(total, items.len());

            let mut first_seen: Vec<&str> = Vec::new();
            for item in &items {
                if !first_seen.contains(&item.category.as_str()) {
                    first_seen.push(item.category.as_str());
                }
            }
            let order: Vec<&str> = groups.iter().map(|g| g.category).collect();
            prop_assert_eq!(order, first_seen);

            for group in &groups {
                let expected: Vec<&MenuItem> =
                    items.iter().filter(|i| i.category == group.category).collect();
                prop_assert_eq!(&group.items, &expected);
            }
        }
    }
}
