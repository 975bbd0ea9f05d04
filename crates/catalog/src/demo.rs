//! Demo store and machine network.
//!
//! The machine list is derived from the index alone so every process sees
//! the same network.

use domain::{Coordinates, Machine, MachineId, Money, Product, Tier};

/// Number of machines in the demo network.
pub const DEMO_MACHINE_COUNT: usize = 300;

const LOCATION_TYPES: [&str; 6] = [
    "Gym",
    "Office",
    "University",
    "Shopping Centre",
    "Hospital",
    "Station",
];

const NEIGHBOURHOODS: [&str; 24] = [
    "Clapham",
    "Shoreditch",
    "Canary Wharf",
    "Kensington",
    "Camden",
    "Wimbledon",
    "Greenwich",
    "Richmond",
    "Hampstead",
    "Brixton",
    "Hackney",
    "Islington",
    "Chelsea",
    "Notting Hill",
    "Soho",
    "Westminster",
    "King's Cross",
    "Stratford",
    "Croydon",
    "Sutton",
    "Barnet",
    "Enfield",
    "Walthamstow",
    "Lewisham",
];

const OPERATORS: [&str; 10] = [
    "PureGym",
    "The Gym",
    "Fitness First",
    "Virgin Active",
    "David Lloyd",
    "WeWork",
    "Regus",
    "The Office Group",
    "Central Working",
    "Spaces",
];

const LONDON_LAT: f64 = 51.5074;
const LONDON_LNG: f64 = -0.1278;

/// The FitFuel demo store.
pub fn products() -> Vec<Product> {
    vec![
        Product::new(
            "prod-1",
            "FitFuel Original",
            Money::from_pence(250),
            Money::from_pence(120),
            "Energy Drinks",
        )
        .with_image("🥤"),
        Product::new(
            "prod-2",
            "FitFuel Berry Blast",
            Money::from_pence(250),
            Money::from_pence(120),
            "Energy Drinks",
        )
        .with_image("🍓"),
        Product::new(
            "prod-3",
            "FitFuel Citrus Surge",
            Money::from_pence(250),
            Money::from_pence(120),
            "Energy Drinks",
        )
        .with_image("🍊"),
        Product::new(
            "prod-4",
            "FitFuel Starter Pack (3-pack)",
            Money::from_pence(650),
            Money::from_pence(330),
            "Bundles",
        )
        .with_image("📦"),
        Product::new(
            "prod-5",
            "FitFuel Protein Bar - Chocolate",
            Money::from_pence(300),
            Money::from_pence(150),
            "Protein Bars",
        )
        .with_image("🍫"),
        Product::new(
            "prod-6",
            "FitFuel Protein Bar - Vanilla",
            Money::from_pence(300),
            Money::from_pence(150),
            "Protein Bars",
        )
        .with_image("🥛"),
    ]
}

/// Machines across London: 40% low tier, 35% medium and 25% high.
pub fn machines() -> Vec<Machine> {
    (0..DEMO_MACHINE_COUNT).map(machine).collect()
}

fn machine(index: usize) -> Machine {
    // Spread neighbouring indexes apart so tiers and places interleave.
    let mix = (index * 7919 + 104_729) % 10_007;

    let tier = match index % 20 {
        0..=7 => Tier::Low,
        8..=14 => Tier::Medium,
        _ => Tier::High,
    };
    let (low, high) = tier.price_band();
    let span = (high.pounds() - low.pounds()) as usize;
    let price = low.pounds() + (mix % span) as i64;
    let foot_traffic = match tier {
        Tier::Low => 800 + (mix % 700),
        Tier::Medium => 1500 + (mix % 1000),
        Tier::High => 2500 + (mix % 2000),
    } as u32;

    let neighbourhood = NEIGHBOURHOODS[mix % NEIGHBOURHOODS.len()];
    let operator = OPERATORS[(mix / 7) % OPERATORS.len()];
    let location_type = LOCATION_TYPES[(mix / 3) % LOCATION_TYPES.len()];

    let lat = LONDON_LAT + ((mix % 1000) as f64 / 1000.0 - 0.5) * 0.2;
    let lng = LONDON_LNG + (((mix / 10) % 1000) as f64 / 1000.0 - 0.5) * 0.3;

    Machine {
        id: MachineId::new(format!("MACH-{:03}", index + 1)),
        name: format!("{operator} {neighbourhood}"),
        location: format!("{neighbourhood}, London"),
        coordinates: Coordinates::new(lat, lng),
        tier,
        foot_traffic,
        price_6_months: Money::from_pounds(price),
        location_type: location_type.to_string(),
    }
}
