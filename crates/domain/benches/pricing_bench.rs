use criterion::{Criterion, black_box, criterion_group, criterion_main};
use domain::{
    CampaignDuration, CompanyInfo, Coordinates, Machine, MachineId, Money, PricingSummary,
    Product, StepPayload, Tier, Wizard, pricing, quick_select_by_tier, stocking,
};

fn make_machines(count: usize) -> Vec<Machine> {
    (0..count)
        .map(|i| {
            let (tier, pounds) = match i % 3 {
                0 => (Tier::Low, 600 + (i % 200) as i64),
                1 => (Tier::Medium, 800 + (i % 200) as i64),
                _ => (Tier::High, 1000 + (i % 500) as i64),
            };
            Machine {
                id: MachineId::new(format!("MACH-{:03}", i + 1)),
                name: format!("Bench Machine {i}"),
                location: "Soho, London".to_string(),
                coordinates: Coordinates::new(51.51, -0.13),
                tier,
                foot_traffic: 1000 + i as u32,
                price_6_months: Money::from_pounds(pounds),
                location_type: "Office".to_string(),
            }
        })
        .collect()
}

fn make_products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| {
            Product::new(
                format!("prod-{i}"),
                format!("Bench Product {i}"),
                Money::from_pence(250 + i as i64),
                Money::from_pence(120 + i as i64),
                "Bench",
            )
        })
        .collect()
}

fn bench_placement_fee(c: &mut Criterion) {
    let machines = make_machines(300);

    c.bench_function("pricing/placement_fee_300_machines", |b| {
        b.iter(|| {
            for duration in CampaignDuration::OFFERED {
                black_box(pricing::placement_fee(black_box(&machines), duration));
            }
        });
    });
}

fn bench_quick_select(c: &mut Criterion) {
    let catalog = make_machines(300);
    let selected: Vec<Machine> = catalog.iter().take(40).cloned().collect();

    c.bench_function("selection/quick_select_by_tier", |b| {
        b.iter(|| black_box(quick_select_by_tier(&catalog, &selected, Tier::High, 25)));
    });
}

fn bench_pricing_summary(c: &mut Criterion) {
    let products = make_products(12);
    let mut wizard = Wizard::new();
    wizard
        .advance(Some(StepPayload::Company(CompanyInfo {
            email: "bench@example.com".to_string(),
            company_name: "Bench Ltd.".to_string(),
            store_url: "bench.myshopify.com".to_string(),
            phone: "+44 0000 000000".to_string(),
            company_reg: None,
        })))
        .unwrap();
    wizard
        .advance(Some(StepPayload::Products(products.clone())))
        .unwrap();
    wizard
        .advance(Some(StepPayload::Machines(make_machines(150))))
        .unwrap();
    wizard
        .advance(Some(StepPayload::Duration(CampaignDuration::TWELVE_MONTHS)))
        .unwrap();
    wizard
        .advance(Some(StepPayload::Config(stocking::default_plan(&products))))
        .unwrap();

    c.bench_function("pricing/summary_150_machines_12_products", |b| {
        b.iter(|| black_box(PricingSummary::for_state(wizard.state())));
    });
}

criterion_group!(
    benches,
    bench_placement_fee,
    bench_quick_select,
    bench_pricing_summary
);
criterion_main!(benches);
