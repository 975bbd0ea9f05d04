//! Pricing engine.
//!
//! Pure functions deriving campaign cost, inventory and revenue-share figures
//! from the current selection. Nothing here is stored; every figure is
//! recomputed from [`ApplicationState`] on demand.

use serde::Serialize;

use crate::application::{
    ApplicationState, CampaignDuration, Machine, Money, Product, ProductConfig, ProductId, Tier,
    stocking,
};

/// Multiplier applied to the six-month base price, in basis points.
const DURATION_MULTIPLIERS: [(u32, u32); 4] = [(1, 2_500), (3, 6_000), (6, 10_000), (12, 17_500)];

const BASE_MULTIPLIER: u32 = 10_000;

/// Share of retail sales revenue kept by the platform.
pub const PLATFORM_SHARE_PERCENT: u32 = 30;

/// Share of retail sales revenue kept by the brand.
pub const BRAND_SHARE_PERCENT: u32 = 100 - PLATFORM_SHARE_PERCENT;

/// Duration multiplier in basis points; unlisted durations pay the base price.
pub fn multiplier_basis_points(duration: CampaignDuration) -> u32 {
    DURATION_MULTIPLIERS
        .iter()
        .find(|(months, _)| *months == duration.months())
        .map_or(BASE_MULTIPLIER, |(_, bp)| *bp)
}

/// Duration multiplier as a plain factor, e.g. `1.75`.
pub fn multiplier(duration: CampaignDuration) -> f64 {
    f64::from(multiplier_basis_points(duration)) / f64::from(BASE_MULTIPLIER)
}

/// Sum of the machines' six-month prices.
pub fn base_price(machines: &[Machine]) -> Money {
    machines.iter().map(|m| m.price_6_months).sum()
}

/// `round(base price × multiplier(duration))` to the whole pound.
pub fn placement_fee(machines: &[Machine], duration: CampaignDuration) -> Money {
    base_price(machines).scale_to_pound(multiplier_basis_points(duration))
}

/// Placement fee per machine, rounded; zero when no machines are selected.
pub fn cost_per_machine(placement_fee: Money, machine_count: usize) -> Money {
    placement_fee.split_to_pound(machine_count as u64)
}

/// Placement fee per month, rounded; zero for a zero-month duration.
pub fn cost_per_month(placement_fee: Money, duration: CampaignDuration) -> Money {
    placement_fee.split_to_pound(u64::from(duration.months()))
}

/// Units stocked in each machine.
pub fn total_units_per_machine(config: &[ProductConfig]) -> u64 {
    config.iter().map(|c| u64::from(c.quantity)).sum()
}

/// Units shipped across all machines.
pub fn total_units(config: &[ProductConfig], machine_count: usize) -> u64 {
    total_units_per_machine(config) * machine_count as u64
}

/// Wholesale cost of stocking one machine. Unconfigured products count as 0.
pub fn inventory_cost_per_machine(products: &[Product], config: &[ProductConfig]) -> Money {
    products
        .iter()
        .map(|p| {
            p.wholesale_cost
                .multiply(u64::from(stocking::quantity_for(config, &p.id)))
        })
        .sum()
}

/// `Σ wholesale cost × quantity × machine count`.
pub fn inventory_cost(products: &[Product], config: &[ProductConfig], machine_count: usize) -> Money {
    inventory_cost_per_machine(products, config).multiply(machine_count as u64)
}

/// Retail revenue if every stocked unit sells.
pub fn projected_revenue(
    products: &[Product],
    config: &[ProductConfig],
    machine_count: usize,
) -> Money {
    products
        .iter()
        .map(|p| {
            p.retail_price
                .multiply(u64::from(stocking::quantity_for(config, &p.id)))
        })
        .sum::<Money>()
        .multiply(machine_count as u64)
}

/// Profit per unit sold. May be negative.
pub fn margin_per_unit(product: &Product) -> Money {
    product.retail_price - product.wholesale_cost
}

/// Margin as a percentage of retail price; zero when the price is zero.
pub fn margin_percent(product: &Product) -> f64 {
    if product.retail_price.is_zero() {
        return 0.0;
    }
    margin_per_unit(product).pence() as f64 / product.retail_price.pence() as f64 * 100.0
}

/// Split of retail revenue between platform and brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevenueSplit {
    pub platform: Money,
    pub brand: Money,
}

impl RevenueSplit {
    /// Splits `revenue`; the brand receives whatever rounding leaves over.
    pub fn of(revenue: Money) -> Self {
        let platform = revenue.percent(PLATFORM_SHARE_PERCENT);
        Self {
            platform,
            brand: revenue - platform,
        }
    }
}

/// Number of machines per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

impl TierCounts {
    pub fn of(machines: &[Machine]) -> Self {
        machines.iter().fold(Self::default(), |mut counts, m| {
            match m.tier {
                Tier::Low => counts.low += 1,
                Tier::Medium => counts.medium += 1,
                Tier::High => counts.high += 1,
            }
            counts
        })
    }

    pub fn get(&self, tier: Tier) -> usize {
        match tier {
            Tier::Low => self.low,
            Tier::Medium => self.medium,
            Tier::High => self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

/// Per-product margin line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductMargin {
    pub product_id: ProductId,
    pub margin_per_unit: Money,
    pub margin_percent: f64,
}

impl ProductMargin {
    pub fn of(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            margin_per_unit: margin_per_unit(product),
            margin_percent: margin_percent(product),
        }
    }
}

/// An offered duration with its marketing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationOption {
    pub duration: CampaignDuration,
    pub name: &'static str,
    pub description: &'static str,
    pub recommended: bool,
    pub badge: Option<&'static str>,
}

pub const DURATION_OPTIONS: [DurationOption; 4] = [
    DurationOption {
        duration: CampaignDuration::ONE_MONTH,
        name: "1 Month Trial",
        description: "Test your products in physical retail",
        recommended: false,
        badge: None,
    },
    DurationOption {
        duration: CampaignDuration::THREE_MONTHS,
        name: "3 Months",
        description: "Gather meaningful sales data",
        recommended: false,
        badge: None,
    },
    DurationOption {
        duration: CampaignDuration::SIX_MONTHS,
        name: "6 Months",
        description: "Most popular - full campaign cycle",
        recommended: true,
        badge: None,
    },
    DurationOption {
        duration: CampaignDuration::TWELVE_MONTHS,
        name: "12 Months",
        description: "Best value - full year presence",
        recommended: false,
        badge: Some("15% off"),
    },
];

/// Price of one duration option for the selected machines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationQuote {
    #[serde(flatten)]
    pub option: DurationOption,
    pub multiplier: f64,
    pub placement_fee: Money,
    pub cost_per_machine: Money,
    pub cost_per_month: Money,
}

/// Quotes every offered duration for `machines`.
pub fn duration_quotes(machines: &[Machine]) -> Vec<DurationQuote> {
    DURATION_OPTIONS
        .iter()
        .map(|option| {
            let fee = placement_fee(machines, option.duration);
            DurationQuote {
                option: *option,
                multiplier: multiplier(option.duration),
                placement_fee: fee,
                cost_per_machine: cost_per_machine(fee, machines.len()),
                cost_per_month: cost_per_month(fee, option.duration),
            }
        })
        .collect()
}

/// Every figure shown on the review step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingSummary {
    pub duration: CampaignDuration,
    pub machine_count: usize,
    pub tier_counts: TierCounts,
    pub base_price: Money,
    pub average_base_price: Money,
    pub placement_fee: Money,
    pub cost_per_machine: Money,
    pub cost_per_month: Money,
    pub total_units_per_machine: u64,
    pub total_units: u64,
    pub inventory_cost_per_machine: Money,
    pub inventory_cost: Money,
    pub platform_share_percent: u32,
    pub brand_share_percent: u32,
    pub projected_revenue: Money,
    pub projected_revenue_split: RevenueSplit,
    pub product_margins: Vec<ProductMargin>,
}

impl PricingSummary {
    /// Derives the summary from the current selection.
    pub fn for_state(state: &ApplicationState) -> Self {
        let machines = state.selected_machines();
        let products = state.selected_products();
        let config = state.product_config();
        let duration = state.duration();
        let count = machines.len();

        let base = base_price(machines);
        let fee = placement_fee(machines, duration);
        let revenue = projected_revenue(products, config, count);

        Self {
            duration,
            machine_count: count,
            tier_counts: TierCounts::of(machines),
            base_price: base,
            average_base_price: base.split_to_pound(count as u64),
            placement_fee: fee,
            cost_per_machine: cost_per_machine(fee, count),
            cost_per_month: cost_per_month(fee, duration),
            total_units_per_machine: total_units_per_machine(config),
            total_units: total_units(config, count),
            inventory_cost_per_machine: inventory_cost_per_machine(products, config),
            inventory_cost: inventory_cost(products, config, count),
            platform_share_percent: PLATFORM_SHARE_PERCENT,
            brand_share_percent: BRAND_SHARE_PERCENT,
            projected_revenue: revenue,
            projected_revenue_split: RevenueSplit::of(revenue),
            product_margins: products.iter().map(ProductMargin::of).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{Coordinates, MachineId};

    fn machine(id: &str, tier: Tier, pounds: i64) -> Machine {
        Machine {
            id: MachineId::new(id),
            name: id.to_string(),
            location: "Brixton, London".to_string(),
            coordinates: Coordinates::new(51.46, -0.11),
            tier,
            foot_traffic: 1500,
            price_6_months: Money::from_pounds(pounds),
            location_type: "Station".to_string(),
        }
    }

    fn scenario_machines() -> Vec<Machine> {
        vec![
            machine("M-1", Tier::Low, 700),
            machine("M-2", Tier::Medium, 900),
            machine("M-3", Tier::High, 1200),
        ]
    }

    fn product(id: &str, retail_pence: i64, wholesale_pence: i64) -> Product {
        Product::new(
            id,
            id,
            Money::from_pence(retail_pence),
            Money::from_pence(wholesale_pence),
            "Energy Drinks",
        )
    }

    #[test]
    fn test_multiplier_table() {
        assert_eq!(multiplier(CampaignDuration::ONE_MONTH), 0.25);
        assert_eq!(multiplier(CampaignDuration::THREE_MONTHS), 0.60);
        assert_eq!(multiplier(CampaignDuration::SIX_MONTHS), 1.00);
        assert_eq!(multiplier(CampaignDuration::TWELVE_MONTHS), 1.75);
    }

    #[test]
    fn test_unlisted_duration_pays_base_price() {
        let machines = scenario_machines();
        for months in [0, 2, 4, 9, 24] {
            assert_eq!(
                placement_fee(&machines, CampaignDuration::from_months(months)),
                Money::from_pounds(2800)
            );
        }
    }

    #[test]
    fn test_six_month_campaign() {
        let machines = scenario_machines();
        let fee = placement_fee(&machines, CampaignDuration::SIX_MONTHS);
        assert_eq!(fee, Money::from_pounds(2800));
        assert_eq!(cost_per_machine(fee, machines.len()), Money::from_pounds(933));
        assert_eq!(
            cost_per_month(fee, CampaignDuration::SIX_MONTHS),
            Money::from_pounds(467)
        );
    }

    #[test]
    fn test_twelve_month_campaign() {
        let fee = placement_fee(&scenario_machines(), CampaignDuration::TWELVE_MONTHS);
        assert_eq!(fee, Money::from_pounds(4900));
    }

    #[test]
    fn test_short_campaigns_round_to_pound() {
        let machines = vec![machine("M-1", Tier::Low, 601), machine("M-2", Tier::Low, 602)];
        // 1203 × 0.25 = 300.75
        assert_eq!(
            placement_fee(&machines, CampaignDuration::ONE_MONTH),
            Money::from_pounds(301)
        );
        // 1203 × 0.60 = 721.8
        assert_eq!(
            placement_fee(&machines, CampaignDuration::THREE_MONTHS),
            Money::from_pounds(722)
        );
    }

    #[test]
    fn test_cost_per_machine_within_rounding_of_fee() {
        let machines = scenario_machines();
        for duration in CampaignDuration::OFFERED {
            let fee = placement_fee(&machines, duration);
            let per_machine = cost_per_machine(fee, machines.len());
            let diff = (per_machine.multiply(machines.len() as u64) - fee).pounds().abs();
            assert!(diff <= machines.len() as i64, "{duration}: off by {diff}");
        }
    }

    #[test]
    fn test_no_machines_costs_nothing_per_machine() {
        for duration in CampaignDuration::OFFERED {
            let fee = placement_fee(&[], duration);
            assert_eq!(fee, Money::zero());
            assert_eq!(cost_per_machine(fee, 0), Money::zero());
        }
        assert_eq!(
            cost_per_machine(Money::from_pounds(500), 0),
            Money::zero()
        );
    }

    #[test]
    fn test_zero_month_cost_per_month_is_zero() {
        assert_eq!(
            cost_per_month(Money::from_pounds(2800), CampaignDuration::from_months(0)),
            Money::zero()
        );
    }

    #[test]
    fn test_inventory_cost_single_product() {
        let products = vec![product("prod-1", 250, 120)];
        let config = vec![ProductConfig::new("prod-1", 30, 1)];
        assert_eq!(inventory_cost(&products, &config, 3), Money::from_pence(10_800));
        assert_eq!(total_units(&config, 3), 90);
    }

    #[test]
    fn test_inventory_cost_sums_products_and_ignores_unconfigured() {
        let products = vec![
            product("prod-1", 250, 120),
            product("prod-4", 650, 330),
            product("prod-5", 300, 150),
        ];
        let config = vec![
            ProductConfig::new("prod-1", 40, 1),
            ProductConfig::new("prod-4", 30, 2),
        ];
        // (1.20 × 40 + 3.30 × 30) × 2 = 147 × 2
        assert_eq!(
            inventory_cost_per_machine(&products, &config),
            Money::from_pence(14_700)
        );
        assert_eq!(inventory_cost(&products, &config, 2), Money::from_pence(29_400));
        assert_eq!(total_units_per_machine(&config), 70);
        assert_eq!(total_units(&config, 2), 140);
    }

    #[test]
    fn test_margins() {
        let p = product("prod-4", 650, 330);
        assert_eq!(margin_per_unit(&p), Money::from_pence(320));
        assert!((margin_percent(&p) - 49.230_769).abs() < 1e-4);

        let loss = product("loss", 100, 150);
        assert_eq!(margin_per_unit(&loss), Money::from_pence(-50));
        assert_eq!(margin_percent(&loss), -50.0);

        let free = product("free", 0, 10);
        assert_eq!(margin_percent(&free), 0.0);
    }

    #[test]
    fn test_revenue_split() {
        let split = RevenueSplit::of(Money::from_pounds(1000));
        assert_eq!(split.platform, Money::from_pounds(300));
        assert_eq!(split.brand, Money::from_pounds(700));

        let odd = RevenueSplit::of(Money::from_pence(1001));
        assert_eq!(odd.platform + odd.brand, Money::from_pence(1001));
        assert_eq!(BRAND_SHARE_PERCENT, 70);
    }

    #[test]
    fn test_tier_counts() {
        let mut machines = scenario_machines();
        machines.push(machine("M-4", Tier::Low, 650));
        let counts = TierCounts::of(&machines);
        assert_eq!(counts.get(Tier::Low), 2);
        assert_eq!(counts.get(Tier::Medium), 1);
        assert_eq!(counts.get(Tier::High), 1);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn test_duration_quotes_cover_offered_options() {
        let quotes = duration_quotes(&scenario_machines());
        let fees: Vec<i64> = quotes.iter().map(|q| q.placement_fee.pounds()).collect();
        assert_eq!(fees, vec![700, 1680, 2800, 4900]);
        assert!(quotes[2].option.recommended);
        assert_eq!(quotes[3].option.badge, Some("15% off"));
        assert_eq!(quotes[0].cost_per_month, Money::from_pounds(700));
    }

    #[test]
    fn test_duration_quote_flattens_option() {
        let quotes = duration_quotes(&scenario_machines());
        let json = serde_json::to_value(&quotes[3]).unwrap();
        assert_eq!(json["duration"], 12);
        assert_eq!(json["name"], "12 Months");
        assert_eq!(json["placement_fee"], 490_000);
    }
}
