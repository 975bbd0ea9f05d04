//! Integration tests for the application wizard.
//!
//! These tests drive the full step sequence and check the pricing summary
//! derived from the accumulated state.

use domain::{
    ApplicationError, CampaignDuration, CompanyInfo, Coordinates, Machine, MachineId, Money,
    PricingSummary, Product, ProductConfig, Step, StepPayload, SubmissionStatus, Tier, Wizard,
    quick_select_by_tier, stocking,
};

fn company() -> CompanyInfo {
    CompanyInfo {
        email: "sarah@fitfuel.com".to_string(),
        company_name: "FitFuel Ltd.".to_string(),
        store_url: "fitfuel.myshopify.com".to_string(),
        phone: "+44 7700 123456".to_string(),
        company_reg: Some("12345678".to_string()),
    }
}

fn fitfuel_original() -> Product {
    Product::new(
        "prod-1",
        "FitFuel Original",
        Money::from_pence(250),
        Money::from_pence(120),
        "Energy Drinks",
    )
}

fn protein_bar() -> Product {
    Product::new(
        "prod-5",
        "FitFuel Protein Bar - Chocolate",
        Money::from_pence(300),
        Money::from_pence(150),
        "Protein Bars",
    )
}

fn machine(id: &str, tier: Tier, pounds: i64) -> Machine {
    Machine {
        id: MachineId::new(id),
        name: format!("PureGym {id}"),
        location: "Clapham, London".to_string(),
        coordinates: Coordinates::new(51.46, -0.14),
        tier,
        foot_traffic: 1800,
        price_6_months: Money::from_pounds(pounds),
        location_type: "Gym".to_string(),
    }
}

fn scenario_machines() -> Vec<Machine> {
    vec![
        machine("MACH-001", Tier::Low, 700),
        machine("MACH-002", Tier::Medium, 900),
        machine("MACH-003", Tier::High, 1200),
    ]
}

/// Validates a payload the way the owning step would, then advances.
fn continue_with(wizard: &mut Wizard, payload: StepPayload) -> Result<Step, ApplicationError> {
    let payload = payload.validate(wizard.state())?;
    wizard.advance(Some(payload))
}

fn wizard_through_config(duration: CampaignDuration, plan: Vec<ProductConfig>) -> Wizard {
    let mut wizard = Wizard::new();
    continue_with(&mut wizard, StepPayload::Company(company())).unwrap();
    continue_with(&mut wizard, StepPayload::Products(vec![fitfuel_original()])).unwrap();
    continue_with(&mut wizard, StepPayload::Machines(scenario_machines())).unwrap();
    continue_with(&mut wizard, StepPayload::Duration(duration)).unwrap();
    continue_with(&mut wizard, StepPayload::Config(plan)).unwrap();
    wizard
}

mod full_flow {
    use super::*;

    #[test]
    fn six_month_campaign_summary() {
        let wizard = wizard_through_config(
            CampaignDuration::SIX_MONTHS,
            vec![ProductConfig::new("prod-1", 30, 1)],
        );
        assert_eq!(wizard.step(), Step::Summary);

        let summary = PricingSummary::for_state(wizard.state());
        assert_eq!(summary.placement_fee, Money::from_pounds(2800));
        assert_eq!(summary.cost_per_machine, Money::from_pounds(933));
        assert_eq!(summary.cost_per_month, Money::from_pounds(467));
        assert_eq!(summary.total_units_per_machine, 30);
        assert_eq!(summary.total_units, 90);
        assert_eq!(summary.inventory_cost, Money::from_pence(10_800));
        assert_eq!(summary.tier_counts.total(), 3);
        assert_eq!(summary.platform_share_percent, 30);
        assert_eq!(summary.brand_share_percent, 70);
        // 2.50 × 90 units
        assert_eq!(summary.projected_revenue, Money::from_pence(22_500));
        assert_eq!(summary.projected_revenue_split.platform, Money::from_pence(6_750));
    }

    #[test]
    fn twelve_month_campaign_summary() {
        let wizard = wizard_through_config(
            CampaignDuration::TWELVE_MONTHS,
            vec![ProductConfig::new("prod-1", 30, 1)],
        );
        let summary = PricingSummary::for_state(wizard.state());
        assert_eq!(summary.placement_fee, Money::from_pounds(4900));
        assert_eq!(summary.base_price, Money::from_pounds(2800));
    }

    #[test]
    fn submission_carries_duration_priced_fee() {
        let mut wizard = wizard_through_config(
            CampaignDuration::THREE_MONTHS,
            vec![ProductConfig::new("prod-1", 40, 1)],
        );
        let submission = wizard.begin_submission(true).unwrap();
        assert_eq!(submission.placement_fee, Money::from_pounds(1680));
        assert_eq!(submission.config.len(), 1);
        assert_eq!(submission.machines.len(), 3);
        assert_eq!(wizard.submission(), &SubmissionStatus::Submitting);
    }
}

mod step_validation {
    use super::*;

    #[test]
    fn invalid_company_blocks_forward_transition() {
        let mut wizard = Wizard::new();
        let mut info = company();
        info.email = "not-an-email".to_string();

        let err = continue_with(&mut wizard, StepPayload::Company(info)).unwrap_err();
        let ApplicationError::Validation(errors) = err else {
            panic!("expected validation error, got {err:?}");
        };
        assert_eq!(errors.message_for("email"), Some("Invalid email format"));
        assert_eq!(wizard.step(), Step::Company);
    }

    #[test]
    fn empty_machine_selection_blocks_forward_transition() {
        let mut wizard = Wizard::new();
        continue_with(&mut wizard, StepPayload::Company(company())).unwrap();
        continue_with(&mut wizard, StepPayload::Products(vec![fitfuel_original()])).unwrap();

        let err = continue_with(&mut wizard, StepPayload::Machines(vec![])).unwrap_err();
        assert!(matches!(err, ApplicationError::NoMachinesSelected));
        assert_eq!(wizard.step(), Step::Machines);
    }

    #[test]
    fn default_plan_satisfies_config_step() {
        let mut wizard = Wizard::new();
        continue_with(&mut wizard, StepPayload::Company(company())).unwrap();
        continue_with(
            &mut wizard,
            StepPayload::Products(vec![fitfuel_original(), protein_bar()]),
        )
        .unwrap();
        continue_with(&mut wizard, StepPayload::Machines(scenario_machines())).unwrap();
        continue_with(&mut wizard, StepPayload::Duration(CampaignDuration::SIX_MONTHS)).unwrap();

        let plan = stocking::default_plan(wizard.state().selected_products());
        continue_with(&mut wizard, StepPayload::Config(plan)).unwrap();

        let summary = PricingSummary::for_state(wizard.state());
        assert_eq!(summary.total_units_per_machine, 70);
        // (1.20 × 40 + 1.50 × 30) × 3
        assert_eq!(summary.inventory_cost, Money::from_pence(27_900));
    }
}

mod navigation {
    use super::*;

    #[test]
    fn never_moves_outside_the_sequence() {
        let mut wizard = Wizard::new();
        for _ in 0..3 {
            assert_eq!(wizard.retreat().unwrap(), Step::Company);
        }
        for _ in 0..10 {
            wizard.advance(None).unwrap();
        }
        assert_eq!(wizard.step(), Step::Summary);
    }

    #[test]
    fn zero_machines_summary_does_not_divide_by_zero() {
        let mut wizard = Wizard::new();
        for _ in 0..5 {
            wizard.advance(None).unwrap();
        }
        let summary = PricingSummary::for_state(wizard.state());
        assert_eq!(summary.machine_count, 0);
        assert_eq!(summary.placement_fee, Money::zero());
        assert_eq!(summary.cost_per_machine, Money::zero());
        assert_eq!(summary.average_base_price, Money::zero());
    }

    #[test]
    fn editing_machines_reprices_without_touching_plan() {
        let mut wizard = wizard_through_config(
            CampaignDuration::SIX_MONTHS,
            vec![ProductConfig::new("prod-1", 30, 1)],
        );
        while wizard.step() != Step::Machines {
            wizard.retreat().unwrap();
        }
        let fewer = scenario_machines().into_iter().take(2).collect();
        continue_with(&mut wizard, StepPayload::Machines(fewer)).unwrap();
        wizard.advance(None).unwrap();
        wizard.advance(None).unwrap();

        let summary = PricingSummary::for_state(wizard.state());
        assert_eq!(summary.placement_fee, Money::from_pounds(1600));
        assert_eq!(summary.inventory_cost, Money::from_pence(7_200));
        assert_eq!(wizard.state().product_config().len(), 1);
    }
}

mod quick_select {
    use super::*;

    #[test]
    fn selecting_more_than_available_takes_whole_tier() {
        let catalog = vec![
            machine("MACH-001", Tier::Low, 650),
            machine("MACH-002", Tier::High, 1100),
            machine("MACH-003", Tier::Low, 720),
            machine("MACH-004", Tier::Medium, 850),
        ];
        let selected = vec![catalog[3].clone(), catalog[1].clone()];

        let picked = quick_select_by_tier(&catalog, &selected, Tier::Low, 100);
        let low: Vec<_> = picked.iter().filter(|m| m.tier == Tier::Low).collect();
        assert_eq!(low.len(), 2);
        assert!(picked.iter().any(|m| m.id.as_str() == "MACH-004"));
        assert!(picked.iter().any(|m| m.id.as_str() == "MACH-002"));
        assert_eq!(picked.len(), 4);
    }
}
