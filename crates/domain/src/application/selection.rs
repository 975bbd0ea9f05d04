//! In-progress product and machine selections.

use serde::Serialize;

use super::{Machine, Money, Product, Tier};
use crate::pricing::{self, TierCounts};

fn toggle<T: Clone, K: PartialEq>(selected: &mut Vec<T>, item: &T, key: impl Fn(&T) -> &K) {
    let id = key(item);
    if let Some(pos) = selected.iter().position(|s| key(s) == id) {
        selected.remove(pos);
    } else {
        selected.push(item.clone());
    }
}

/// Adds the product if absent, removes it if already selected.
pub fn toggle_product(selected: &mut Vec<Product>, product: &Product) {
    toggle(selected, product, |p| &p.id);
}

/// Adds the machine if absent, removes it if already selected.
pub fn toggle_machine(selected: &mut Vec<Machine>, machine: &Machine) {
    toggle(selected, machine, |m| &m.id);
}

/// Replaces the selected machines of `tier` with the first `count` machines
/// of that tier in catalog order.
///
/// Selections of other tiers are kept, in their original order, ahead of the
/// newly picked machines. Asking for more machines than the tier has selects
/// all of them.
pub fn quick_select_by_tier(
    catalog: &[Machine],
    selected: &[Machine],
    tier: Tier,
    count: usize,
) -> Vec<Machine> {
    selected
        .iter()
        .filter(|m| m.tier != tier)
        .chain(catalog.iter().filter(|m| m.tier == tier).take(count))
        .cloned()
        .collect()
}

/// Running totals shown while picking products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSelectionSummary {
    pub count: usize,
    /// Wholesale cost of one unit of every selected product.
    pub unit_wholesale_total: Money,
}

impl ProductSelectionSummary {
    pub fn of(selected: &[Product]) -> Self {
        Self {
            count: selected.len(),
            unit_wholesale_total: selected.iter().map(|p| p.wholesale_cost).sum(),
        }
    }
}

/// Running totals shown while picking machines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineSelectionSummary {
    pub count: usize,
    /// Sum of six-month prices.
    pub base_total: Money,
    /// Rounded to the pound; zero when nothing is selected.
    pub average_base_price: Money,
    pub tier_counts: TierCounts,
}

impl MachineSelectionSummary {
    pub fn of(selected: &[Machine]) -> Self {
        let base_total = pricing::base_price(selected);
        Self {
            count: selected.len(),
            base_total,
            average_base_price: base_total.split_to_pound(selected.len() as u64),
            tier_counts: TierCounts::of(selected),
        }
    }
}
