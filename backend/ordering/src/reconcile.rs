use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
};

use crate::models::{MissingOrderPlan, OrderAssignment, OrderRange, OrderingSummary, Product};

/// Products of a category that carry an order value, paired with that value.
fn ordered_in<'a>(
    items: &'a [Product],
    category_id: &str,
) -> impl Iterator<Item = (&'a Product, i64)> {
    items
        .iter()
        .filter(move |product| product.in_category(category_id))
        .filter_map(|product| product.display_order.map(|order| (product, order)))
}

/// Oldest first, then by id so equal timestamps still sort the same way every time.
fn tiebreak(a: &Product, b: &Product) -> Ordering {
    a.created_at
        .cmp(&b.created_at)
        .then_with(|| a.id.cmp(&b.id))
}

/// Suggested order for a new product: one past the highest order in the
/// category, or 1 when nothing there is ordered yet.
pub fn next_available_order(items: &[Product], category_id: &str) -> i64 {
    ordered_in(items, category_id)
        .map(|(_, order)| order)
        .max()
        .map_or(1, |max| max.saturating_add(1).max(1))
}

pub fn count_unordered(items: &[Product], category_id: &str) -> usize {
    items
        .iter()
        .filter(|product| product.in_category(category_id) && product.display_order.is_none())
        .count()
}

/// Number of occurrences beyond the first for every order value shared by
/// more than one product. Zero means the category's orders are unique.
pub fn count_duplicates(items: &[Product], category_id: &str) -> usize {
    let mut occurrences: HashMap<i64, usize> = HashMap::new();

    for (_, order) in ordered_in(items, category_id) {
        *occurrences.entry(order).or_default() += 1;
    }

    occurrences.values().map(|count| count - 1).sum()
}

/// Every order value held by more than one product, members in tiebreak order.
pub fn duplicate_groups<'a>(items: &'a [Product], category_id: &str) -> BTreeMap<i64, Vec<&'a Product>> {
    let mut groups: BTreeMap<i64, Vec<&Product>> = BTreeMap::new();

    for (product, order) in ordered_in(items, category_id) {
        groups.entry(order).or_default().push(product);
    }

    groups.retain(|_, members| members.len() > 1);
    for members in groups.values_mut() {
        members.sort_by(|a, b| tiebreak(a, b));
    }

    groups
}

/// Products of the category without an order, oldest first.
pub fn unordered_items<'a>(items: &'a [Product], category_id: &str) -> Vec<&'a Product> {
    let mut unordered: Vec<&Product> = items
        .iter()
        .filter(|product| product.in_category(category_id) && product.display_order.is_none())
        .collect();

    unordered.sort_by(|a, b| tiebreak(a, b));
    unordered
}

/// Renumbers the ordered products of a category so every order is unique.
///
/// Products are ranked by `(order, created_at, id)` and handed consecutive
/// values starting at the lowest order already present. Only products whose
/// value actually changes get an assignment. A category without duplicates
/// yields an empty plan, so applying a plan and planning again is a no-op.
pub fn plan_duplicate_repair(items: &[Product], category_id: &str) -> Vec<OrderAssignment> {
    if count_duplicates(items, category_id) == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(&Product, i64)> = ordered_in(items, category_id).collect();
    ranked.sort_by(|(a, a_order), (b, b_order)| a_order.cmp(b_order).then_with(|| tiebreak(a, b)));

    let Some(&(_, start)) = ranked.first() else {
        return Vec::new();
    };

    ranked
        .into_iter()
        .zip(0_i64..)
        .filter_map(|((product, current), offset)| {
            let new_order = start.saturating_add(offset);

            (new_order != current).then(|| OrderAssignment {
                item_id: product.id.clone(),
                new_order,
            })
        })
        .collect()
}

/// Gives every unordered product of a category an order, oldest first,
/// continuing after the current maximum.
pub fn plan_missing_order_repair(items: &[Product], category_id: &str) -> MissingOrderPlan {
    let start = next_available_order(items, category_id);

    let instructions: Vec<OrderAssignment> = unordered_items(items, category_id)
        .into_iter()
        .zip(0_i64..)
        .map(|(product, offset)| OrderAssignment {
            item_id: product.id.clone(),
            new_order: start.saturating_add(offset),
        })
        .collect();

    let range = instructions.last().map(|last| OrderRange {
        start_order: start,
        end_order: last.new_order,
    });

    MissingOrderPlan {
        instructions,
        range,
    }
}

/// Writes a plan into an in-memory list. Category membership is never
/// touched. Returns how many products actually changed.
pub fn apply_plan(items: &mut [Product], plan: &[OrderAssignment]) -> usize {
    let assignments: HashMap<&str, i64> = plan
        .iter()
        .map(|assignment| (assignment.item_id.as_str(), assignment.new_order))
        .collect();

    let mut changed = 0;
    for product in items.iter_mut() {
        let Some(&new_order) = assignments.get(product.id.as_str()) else {
            continue;
        };

        if product.display_order != Some(new_order) {
            product.display_order = Some(new_order);
            changed += 1;
        }
    }

    changed
}

/// Presentation order: ordered products by rank, then unordered ones newest first.
pub fn display_sort(items: &mut [Product]) {
    items.sort_by(|a, b| match (a.display_order, b.display_order) {
        (Some(a_order), Some(b_order)) => a_order.cmp(&b_order).then_with(|| tiebreak(a, b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b
            .created_at
            .cmp(&a.created_at)
            .then_with(|| a.id.cmp(&b.id)),
    });
}

pub fn summarize(items: &[Product], category_id: &str) -> OrderingSummary {
    OrderingSummary {
        category_id: category_id.to_string(),
        total: items
            .iter()
            .filter(|product| product.in_category(category_id))
            .count(),
        next_available_order: next_available_order(items, category_id),
        unordered: count_unordered(items, category_id),
        duplicates: count_duplicates(items, category_id),
    }
}
