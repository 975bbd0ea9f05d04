//! Machine search, filtering and ordering, plus product grouping by category.

use std::str::FromStr;

use domain::{Machine, Product, Tier};
use serde::{Deserialize, Serialize};

/// Ordering applied to machine listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineSort {
    /// Cheapest six-month price first.
    Price,
    /// Busiest machine first.
    #[default]
    Traffic,
}

impl FromStr for MachineSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "price" => Ok(MachineSort::Price),
            "traffic" => Ok(MachineSort::Traffic),
            other => Err(format!("unknown sort order: {other}")),
        }
    }
}

/// Builder for filtering and ordering machine listings.
///
/// An unset filter matches everything. Search is case-insensitive over the
/// machine name and location label.
#[derive(Debug, Clone, Default)]
pub struct MachineQuery {
    /// Free-text search.
    pub search: Option<String>,

    /// Only machines of this tier.
    pub tier: Option<Tier>,

    /// Only machines of this venue kind.
    pub location_type: Option<String>,

    pub sort: MachineSort,
}

impl MachineQuery {
    /// Creates a new query matching every machine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by free text. Blank text is ignored.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = (!text.trim().is_empty()).then_some(text);
        self
    }

    /// Filters by tier.
    pub fn tier(mut self, tier: Tier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Filters by location type.
    pub fn location_type(mut self, location_type: impl Into<String>) -> Self {
        self.location_type = Some(location_type.into());
        self
    }

    /// Sets the ordering.
    pub fn sort(mut self, sort: MachineSort) -> Self {
        self.sort = sort;
        self
    }

    /// Returns true if the machine passes every filter.
    pub fn matches(&self, machine: &Machine) -> bool {
        if let Some(search) = &self.search {
            let needle = search.trim().to_lowercase();
            if !machine.name.to_lowercase().contains(&needle)
                && !machine.location.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        if self.tier.is_some_and(|tier| machine.tier != tier) {
            return false;
        }
        if let Some(location_type) = &self.location_type {
            if &machine.location_type != location_type {
                return false;
            }
        }
        true
    }

    /// Filters then sorts. Ties keep catalog order.
    pub fn apply(&self, machines: &[Machine]) -> Vec<Machine> {
        let mut matched: Vec<Machine> = machines
            .iter()
            .filter(|m| self.matches(m))
            .cloned()
            .collect();
        match self.sort {
            MachineSort::Price => matched.sort_by_key(|m| m.price_6_months),
            MachineSort::Traffic => matched.sort_by(|a, b| b.foot_traffic.cmp(&a.foot_traffic)),
        }
        matched
    }
}

/// Distinct location types in first-appearance order.
pub fn location_types(machines: &[Machine]) -> Vec<String> {
    let mut types: Vec<String> = Vec::new();
    for machine in machines {
        if !types.contains(&machine.location_type) {
            types.push(machine.location_type.clone());
        }
    }
    types
}

/// Products sharing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub products: Vec<Product>,
}

/// Groups products by category, categories in first-appearance order.
pub fn categories(products: &[Product]) -> Vec<CategoryGroup> {
    let mut groups: Vec<CategoryGroup> = Vec::new();
    for product in products {
        match groups.iter_mut().find(|g| g.category == product.category) {
            Some(group) => group.products.push(product.clone()),
            None => groups.push(CategoryGroup {
                category: product.category.clone(),
                products: vec![product.clone()],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Coordinates, MachineId, Money};

    fn machine(id: &str, name: &str, tier: Tier, pounds: i64, traffic: u32, kind: &str) -> Machine {
        Machine {
            id: MachineId::new(id),
            name: name.to_string(),
            location: format!("{}, London", name.rsplit(' ').next().unwrap_or_default()),
            coordinates: Coordinates::new(51.5, -0.12),
            tier,
            foot_traffic: traffic,
            price_6_months: Money::from_pounds(pounds),
            location_type: kind.to_string(),
        }
    }

    fn network() -> Vec<Machine> {
        vec![
            machine("M-1", "PureGym Clapham", Tier::Low, 700, 900, "Gym"),
            machine("M-2", "WeWork Soho", Tier::High, 1200, 4000, "Office"),
            machine("M-3", "Regus Camden", Tier::Medium, 850, 2000, "Office"),
            machine("M-4", "The Gym Soho", Tier::Low, 650, 1400, "Gym"),
        ]
    }

    fn ids(machines: &[Machine]) -> Vec<&str> {
        machines.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_default_sorts_by_traffic_descending() {
        let result = MachineQuery::new().apply(&network());
        assert_eq!(ids(&result), vec!["M-2", "M-3", "M-4", "M-1"]);
    }

    #[test]
    fn test_sort_by_price_ascending() {
        let result = MachineQuery::new().sort(MachineSort::Price).apply(&network());
        assert_eq!(ids(&result), vec!["M-4", "M-1", "M-3", "M-2"]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let result = MachineQuery::new().search("soho").apply(&network());
        assert_eq!(ids(&result), vec!["M-2", "M-4"]);
    }

    #[test]
    fn test_blank_search_matches_everything() {
        let query = MachineQuery::new().search("   ");
        assert!(query.search.is_none());
        assert_eq!(query.apply(&network()).len(), 4);
    }

    #[test]
    fn test_filters_combine() {
        let result = MachineQuery::new()
            .tier(Tier::Low)
            .location_type("Gym")
            .sort(MachineSort::Price)
            .apply(&network());
        assert_eq!(ids(&result), vec!["M-4", "M-1"]);

        let none = MachineQuery::new()
            .tier(Tier::High)
            .location_type("Gym")
            .apply(&network());
        assert!(none.is_empty());
    }

    #[test]
    fn test_location_types_first_appearance_order() {
        assert_eq!(location_types(&network()), vec!["Gym", "Office"]);
    }

    #[test]
    fn test_sort_parsing() {
        assert_eq!("PRICE".parse::<MachineSort>(), Ok(MachineSort::Price));
        assert_eq!("traffic".parse::<MachineSort>(), Ok(MachineSort::Traffic));
        assert!("distance".parse::<MachineSort>().is_err());
    }

    #[test]
    fn test_categories_group_in_first_appearance_order() {
        let product = |id: &str, category: &str| {
            Product::new(id, id, Money::from_pence(300), Money::from_pence(150), category)
        };
        let groups = categories(&[
            product("a", "Energy Drinks"),
            product("b", "Bundles"),
            product("c", "Energy Drinks"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Energy Drinks");
        assert_eq!(groups[0].products.len(), 2);
        assert_eq!(groups[1].category, "Bundles");
    }
}
