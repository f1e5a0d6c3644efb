//! Board evaluation: catalog + instant → the view model hosts render.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use crate::core::annotate::annotate;
use crate::core::catalog::Catalog;
use crate::core::geo::nearest_warehouse;
use crate::core::status::{CutoffStatus, local_clock, status_for};
use crate::io::location::GeoOutcome;

/// Everything a host needs to render one warehouse's board.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BoardView {
    /// Warehouse code the board was evaluated for.
    pub region: String,
    /// Warehouse display name.
    pub warehouse: String,
    /// The warehouse's local wall clock, e.g. `"2:05 PM"`.
    pub clock: String,
    pub methods: Vec<MethodView>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MethodView {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    pub readings: Vec<Reading>,
    /// Notes with their first time token wrapped in emphasis markup.
    pub notes: Vec<String>,
}

/// One cutoff and its classification.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Reading {
    pub cutoff: String,
    /// `None` when the status computation failed; sibling readings and
    /// methods still render.
    pub status: Option<CutoffStatus>,
}

/// Nearest-warehouse suggestion data for an acquired location fix.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Suggestion {
    pub code: String,
    pub name: String,
    /// Rounded to whole miles here, at the presentation boundary.
    pub miles: i64,
}

/// Evaluate one warehouse's board at `now`.
///
/// A cutoff whose status computation fails yields an unavailable reading
/// (logged) without blocking the rest of the board.
pub fn evaluate(catalog: &Catalog, region: &str, now: DateTime<Utc>) -> Result<BoardView> {
    let warehouse = catalog
        .warehouse(region)
        .ok_or_else(|| anyhow!("unknown warehouse code '{region}'"))?;
    let clock = local_clock(&warehouse.zone, now)?;

    let methods = catalog
        .methods(region)
        .iter()
        .map(|method| {
            let readings = method
                .cutoffs
                .iter()
                .map(|cutoff| {
                    let status = match status_for(cutoff, &warehouse.zone, now) {
                        Ok(status) => Some(status),
                        Err(err) => {
                            warn!(
                                method = %method.id,
                                cutoff = %cutoff,
                                %err,
                                "cutoff status unavailable"
                            );
                            None
                        }
                    };
                    Reading {
                        cutoff: cutoff.clone(),
                        status,
                    }
                })
                .collect();

            MethodView {
                id: method.id.clone(),
                title: method.title.clone(),
                details: method.details.clone(),
                readings,
                notes: method
                    .notes
                    .iter()
                    .map(|note| annotate(note).into_owned())
                    .collect(),
            }
        })
        .collect();

    Ok(BoardView {
        region: warehouse.code.clone(),
        warehouse: warehouse.name.clone(),
        clock,
        methods,
    })
}

/// Resolve a geolocation outcome into suggestion data.
///
/// Denial produces `None`: the host shows no suggestion and nothing else
/// changes.
pub fn suggestion(catalog: &Catalog, outcome: GeoOutcome) -> Result<Option<Suggestion>> {
    let point = match outcome {
        GeoOutcome::Fix(point) => point,
        GeoOutcome::Denied => return Ok(None),
    };
    let nearest = nearest_warehouse(point, &catalog.warehouses)?;
    let warehouse = catalog
        .warehouse(&nearest.code)
        .ok_or_else(|| anyhow!("nearest code '{}' missing from catalog", nearest.code))?;
    Ok(Some(Suggestion {
        code: nearest.code,
        name: warehouse.name.clone(),
        miles: nearest.miles.round() as i64,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Coordinate;
    use crate::test_support;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    fn at_new_york(hour: u32, minute: u32) -> DateTime<Utc> {
        New_York
            .with_ymd_and_hms(2025, 6, 2, hour, minute, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn evaluate_classifies_each_cutoff() {
        let view = evaluate(&Catalog::builtin(), "NY", at_new_york(13, 10)).expect("evaluate");
        assert_eq!(view.warehouse, "Ronkonkoma - NY");
        assert_eq!(view.clock, "1:10 PM");

        let status_of = |id: &str| {
            view.methods
                .iter()
                .find(|method| method.id == id)
                .and_then(|method| method.readings[0].status)
        };
        // 13:45 is 35 minutes out, 16:00 is hours out, 12:00 has passed.
        assert_eq!(status_of("ltl"), Some(CutoffStatus::Warning));
        assert_eq!(status_of("fed_up"), Some(CutoffStatus::Ok));
        assert_eq!(status_of("fed_exp"), Some(CutoffStatus::Expired));
        assert_eq!(status_of("cust_exp"), Some(CutoffStatus::Ok));
    }

    #[test]
    fn evaluate_annotates_notes() {
        let view = evaluate(&Catalog::builtin(), "NY", at_new_york(9, 0)).expect("evaluate");
        let ltl = view
            .methods
            .iter()
            .find(|method| method.id == "ltl")
            .expect("ltl method");
        assert_eq!(
            ltl.notes[0],
            "Pending paperwork to Shipping Department by <strong>1:45 PM (EST)</strong>"
        );
    }

    #[test]
    fn evaluate_rejects_unknown_region() {
        let err = evaluate(&Catalog::builtin(), "ZZ", at_new_york(9, 0)).expect_err("region");
        assert!(err.to_string().contains("unknown warehouse code 'ZZ'"));
    }

    #[test]
    fn one_bad_cutoff_does_not_block_the_rest() {
        let catalog = test_support::catalog(
            vec![test_support::warehouse("NY", "America/New_York", 40.79, -73.12)],
            vec![test_support::schedule(
                "NY",
                vec![
                    test_support::method("broken", &["25:99"]),
                    test_support::method("ltl", &["13:45"]),
                ],
            )],
        );
        let view = evaluate(&catalog, "NY", at_new_york(9, 0)).expect("evaluate");
        assert_eq!(view.methods[0].readings[0].status, None);
        assert_eq!(view.methods[1].readings[0].status, Some(CutoffStatus::Ok));
    }

    #[test]
    fn suggestion_resolves_nearest_for_a_fix() {
        let point = Coordinate::new(40.70, -74.00).expect("coordinate");
        let suggestion = suggestion(&Catalog::builtin(), GeoOutcome::Fix(point))
            .expect("resolve")
            .expect("some suggestion");
        assert_eq!(suggestion.code, "NY");
        assert_eq!(suggestion.name, "Ronkonkoma - NY");
        assert_eq!(suggestion.miles, 46);
    }

    #[test]
    fn suggestion_is_omitted_on_denial() {
        let resolved = suggestion(&Catalog::builtin(), GeoOutcome::Denied).expect("resolve");
        assert_eq!(resolved, None);
    }

    #[test]
    fn view_serializes_to_json() {
        let view = evaluate(&Catalog::builtin(), "TX", at_new_york(9, 0)).expect("evaluate");
        let json = serde_json::to_value(&view).expect("serialize");
        assert_eq!(json["region"], "TX");
        assert_eq!(json["methods"][0]["readings"][0]["cutoff"], "14:30");
        assert_eq!(json["methods"][0]["readings"][0]["status"], "ok");
    }
}
