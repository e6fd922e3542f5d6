//! 2023 tables shared by the pipeline tests.

use std::collections::BTreeMap;

use rust_decimal_macros::dec;

use crate::models::{
    Bracket, BracketTable, Jurisdiction, JurisdictionSettings, RateValue, RulingThresholds,
    TaxKind, TaxTables,
};

fn settings(jurisdiction: Jurisdiction) -> JurisdictionSettings {
    JurisdictionSettings {
        jurisdiction,
        current_year: 2023,
        default_working_hours: dec!(40),
        working_weeks: dec!(52),
        working_days: dec!(255),
        ruling_thresholds: BTreeMap::new(),
    }
}

pub(crate) fn dutch_tables() -> TaxTables {
    let mut settings = settings(Jurisdiction::Netherlands);
    settings.ruling_thresholds.insert(
        2023,
        RulingThresholds {
            normal: dec!(41954),
            young: dec!(31891),
            research: dec!(0),
        },
    );

    let mut brackets = BracketTable::new();
    brackets
        .insert(
            TaxKind::Payroll,
            2023,
            vec![
                Bracket::new(dec!(0), Some(dec!(37149)), dec!(0.0928)),
                Bracket::new(dec!(37150), Some(dec!(73031)), dec!(0.3693)),
                Bracket::new(dec!(73032), None, dec!(0.495)),
            ],
        )
        .unwrap();
    brackets
        .insert(
            TaxKind::Social,
            2023,
            vec![Bracket {
                min: dec!(0),
                max: Some(dec!(37150)),
                rate: RateValue::classify(dec!(0.3693)),
                social: Some(RateValue::classify(dec!(0.2765))),
                older: Some(RateValue::classify(dec!(0.0975))),
            }],
        )
        .unwrap();
    brackets
        .insert(
            TaxKind::GeneralCredit,
            2023,
            vec![
                Bracket::new(dec!(0), Some(dec!(22661)), dec!(3070)),
                Bracket::new(dec!(22661), Some(dec!(73031)), dec!(-0.06095)),
                Bracket::new(dec!(73032), None, dec!(0)),
            ],
        )
        .unwrap();
    brackets
        .insert(
            TaxKind::LabourCredit,
            2023,
            vec![
                Bracket::new(dec!(0), Some(dec!(10741)), dec!(0.08231)),
                Bracket::new(dec!(10741), Some(dec!(23201)), dec!(0.29861)),
                Bracket::new(dec!(23201), Some(dec!(37692)), dec!(0.03085)),
                Bracket::new(dec!(37692), Some(dec!(115296)), dec!(-0.0651)),
                Bracket::new(dec!(115296), None, dec!(0)),
            ],
        )
        .unwrap();

    TaxTables { settings, brackets }
}

pub(crate) fn cyprus_tables() -> TaxTables {
    let mut brackets = BracketTable::new();
    brackets
        .insert(
            TaxKind::Payroll,
            2023,
            vec![
                Bracket::new(dec!(0), Some(dec!(19500)), dec!(0.0)),
                Bracket::new(dec!(19501), Some(dec!(28000)), dec!(0.2)),
                Bracket::new(dec!(28001), Some(dec!(36300)), dec!(0.25)),
                Bracket::new(dec!(36301), Some(dec!(60000)), dec!(0.3)),
                Bracket::new(dec!(60001), None, dec!(0.35)),
            ],
        )
        .unwrap();
    brackets
        .insert(
            TaxKind::Social,
            2023,
            vec![Bracket::new(dec!(0), Some(dec!(58080)), dec!(0.083))],
        )
        .unwrap();
    brackets
        .insert(
            TaxKind::Nhs,
            2023,
            vec![Bracket::new(dec!(0), None, dec!(0.0265))],
        )
        .unwrap();

    TaxTables {
        settings: settings(Jurisdiction::Cyprus),
        brackets,
    }
}
