//! End-to-end board scenarios through the public API.

use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::America::New_York;

use cutoff::board::{evaluate, suggestion};
use cutoff::core::catalog::Catalog;
use cutoff::core::geo::{Coordinate, haversine_miles, nearest_warehouse};
use cutoff::core::status::CutoffStatus;
use cutoff::io::clock::{Clock, FixedClock};
use cutoff::io::config::{load_catalog, write_catalog};
use cutoff::io::location::{GeoOutcome, location_request};
use cutoff::test_support;

fn monday_new_york(hour: u32, minute: u32) -> DateTime<Utc> {
    New_York
        .with_ymd_and_hms(2025, 6, 2, hour, minute, 0)
        .unwrap()
        .with_timezone(&Utc)
}

/// A device in lower Manhattan resolves Ronkonkoma as the nearest
/// warehouse, and the host receives it through the one-shot request.
#[test]
fn device_fix_drives_the_nearest_suggestion() {
    let catalog = Catalog::builtin();

    let (reply, request) = location_request();
    reply.fulfill(GeoOutcome::Fix(
        Coordinate::new(40.70, -74.00).expect("coordinate"),
    ));

    let suggested = suggestion(&catalog, request.wait())
        .expect("resolve")
        .expect("suggestion");
    assert_eq!(suggested.code, "NY");
    assert_eq!(suggested.name, "Ronkonkoma - NY");
    assert_eq!(suggested.miles, 46);
}

/// Denied geolocation degrades to "no suggestion"; the board itself is
/// unaffected.
#[test]
fn denied_fix_omits_the_suggestion_but_renders_the_board() {
    let catalog = Catalog::builtin();

    let (reply, request) = location_request();
    reply.fulfill(GeoOutcome::Denied);
    assert_eq!(suggestion(&catalog, request.wait()).expect("resolve"), None);

    let clock = FixedClock(monday_new_york(13, 10));
    let view = evaluate(&catalog, "NY", clock.now()).expect("evaluate");
    assert_eq!(view.clock, "1:10 PM");
    assert_eq!(view.methods.len(), 4);
}

/// The resolver is pure math over the catalog: the same distances fall out
/// of `haversine_miles` directly.
#[test]
fn nearest_agrees_with_direct_haversine() {
    let catalog = Catalog::builtin();
    let device = Coordinate::new(40.70, -74.00).expect("coordinate");

    let nearest = nearest_warehouse(device, &catalog.warehouses).expect("nearest");
    let ny = catalog.warehouse("NY").expect("NY");
    let direct = haversine_miles(
        device,
        Coordinate::new(ny.latitude, ny.longitude).expect("coordinate"),
    );
    assert_eq!(nearest.miles, direct);
    assert!((direct - 46.3).abs() < 0.5, "got {direct}");
}

/// Each warehouse's board classifies against its own zone at one shared
/// instant.
#[test]
fn regions_classify_in_their_own_zones() {
    let catalog = Catalog::builtin();
    // 13:10 New York is 12:10 Chicago and 10:10 Sparks.
    let now = monday_new_york(13, 10);

    let ny = evaluate(&catalog, "NY", now).expect("NY board");
    let tx = evaluate(&catalog, "TX", now).expect("TX board");
    let nv = evaluate(&catalog, "NV", now).expect("NV board");

    assert_eq!(ny.clock, "1:10 PM");
    assert_eq!(tx.clock, "12:10 PM");
    assert_eq!(nv.clock, "10:10 AM");

    let first_status = |view: &cutoff::board::BoardView, id: &str| {
        view.methods
            .iter()
            .find(|method| method.id == id)
            .and_then(|method| method.readings[0].status)
    };
    // NY LTL (13:45) is 35 minutes out; TX LTL (14:30) has over two hours;
    // NV LTL (13:30) has over three.
    assert_eq!(first_status(&ny, "ltl"), Some(CutoffStatus::Warning));
    assert_eq!(first_status(&tx, "ltl"), Some(CutoffStatus::Ok));
    assert_eq!(first_status(&nv, "ltl"), Some(CutoffStatus::Ok));
    // NY FedEx Express (12:00) is already gone.
    assert_eq!(first_status(&ny, "fed_exp"), Some(CutoffStatus::Expired));
}

/// Notes render with their first time token emphasized, ready for the
/// presentation layer.
#[test]
fn notes_carry_emphasis_markup() {
    let catalog = Catalog::builtin();
    let view = evaluate(&catalog, "TX", monday_new_york(9, 0)).expect("evaluate");
    let ltl = view
        .methods
        .iter()
        .find(|method| method.id == "ltl")
        .expect("ltl");
    assert_eq!(
        ltl.notes,
        vec![
            "Pending paperwork to Shipping Department by <strong>2:30 PM (CST)</strong>"
                .to_string(),
            "At <strong>2:30 PM (CST)</strong> - Report number of remaining skids to Shipping Department"
                .to_string(),
        ]
    );
}

/// A fixture catalog swapped in through the TOML loader behaves exactly
/// like the compiled-in one.
#[test]
fn fixture_catalog_substitutes_for_builtin() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = temp.path().join("catalog.toml");

    let fixture = test_support::catalog(
        vec![test_support::warehouse("AK", "America/Anchorage", 61.2, -149.9)],
        vec![test_support::schedule(
            "AK",
            vec![test_support::method("ltl", &["10:00"])],
        )],
    );
    write_catalog(&path, &fixture).expect("write");

    let catalog = load_catalog(&path).expect("load");
    let now = monday_new_york(13, 10); // 09:10 in Anchorage
    let view = evaluate(&catalog, "AK", now).expect("evaluate");
    assert_eq!(view.clock, "9:10 AM");
    assert_eq!(view.methods[0].readings[0].status, Some(CutoffStatus::Warning));
}
