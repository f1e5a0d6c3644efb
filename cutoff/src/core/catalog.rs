//! Immutable warehouse and shipping-method configuration.
//!
//! The catalog ships compiled in and is loaded once at startup, then
//! injected into consumers; nothing reads it from ambient global state.
//! Warehouse order is significant: distance ties resolve to the earlier
//! entry.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::geo::Coordinate;
use crate::core::status::{CutoffTime, parse_zone};

/// One shipping location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warehouse {
    /// Short unique identifier, e.g. `"NY"`.
    pub code: String,
    /// Human-facing name, e.g. `"Ronkonkoma - NY"`.
    pub name: String,
    /// IANA zone the warehouse clocks run on.
    pub zone: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A shipping method and its cutoff schedule at one warehouse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingMethod {
    pub id: String,
    pub title: String,
    /// 24-hour `"HH:MM"` cutoffs in the warehouse's local time.
    pub cutoffs: Vec<String>,
    /// Extra detail lines hosts may show next to the title.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
    /// Free-text notes; see [`crate::core::annotate`].
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

/// The methods offered at one warehouse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    /// Code of the warehouse this schedule belongs to.
    pub warehouse: String,
    pub methods: Vec<ShippingMethod>,
}

/// The full configuration: warehouses in declared order plus their
/// schedules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub warehouses: Vec<Warehouse>,
    #[serde(default)]
    pub schedules: Vec<Schedule>,
}

impl Catalog {
    pub fn warehouse(&self, code: &str) -> Option<&Warehouse> {
        self.warehouses.iter().find(|warehouse| warehouse.code == code)
    }

    /// Methods scheduled at `code`; empty when the warehouse has none.
    pub fn methods(&self, code: &str) -> &[ShippingMethod] {
        self.schedules
            .iter()
            .find(|schedule| schedule.warehouse == code)
            .map(|schedule| schedule.methods.as_slice())
            .unwrap_or(&[])
    }

    /// Check semantic invariants the serde layer cannot express:
    /// - at least one warehouse, unique codes
    /// - coordinates in range, zones present in the IANA database
    /// - schedules reference known warehouses
    /// - every method has at least one parseable cutoff
    ///
    /// Returns a list of stable error messages (empty on success). The
    /// catalog is static data, so violations are caught here at load and
    /// test time rather than while rendering.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.warehouses.is_empty() {
            errors.push("catalog has no warehouses".to_string());
        }

        let mut seen = HashSet::new();
        for warehouse in &self.warehouses {
            if !seen.insert(warehouse.code.clone()) {
                errors.push(format!("duplicate warehouse code '{}'", warehouse.code));
            }
            if let Err(err) = Coordinate::new(warehouse.latitude, warehouse.longitude) {
                errors.push(format!("warehouse '{}': {err}", warehouse.code));
            }
            if let Err(err) = parse_zone(&warehouse.zone) {
                errors.push(format!("warehouse '{}': {err}", warehouse.code));
            }
        }

        for schedule in &self.schedules {
            if self.warehouse(&schedule.warehouse).is_none() {
                errors.push(format!(
                    "schedule references unknown warehouse '{}'",
                    schedule.warehouse
                ));
            }
            for method in &schedule.methods {
                let path = format!("{}/{}", schedule.warehouse, method.id);
                if method.cutoffs.is_empty() {
                    errors.push(format!("{path}: method has no cutoffs"));
                }
                for cutoff in &method.cutoffs {
                    if let Err(err) = cutoff.parse::<CutoffTime>() {
                        errors.push(format!("{path}: {err}"));
                    }
                }
            }
        }

        errors
    }

    /// The compiled-in production catalog: three warehouses and their
    /// shipping-method schedules.
    pub fn builtin() -> Self {
        let ltl_details = &[
            "LTL shipping methods include:",
            "• A Duie Pyle",
            "• ABF",
            "• Old Dominion",
            "• FlatBed",
        ];

        Self {
            warehouses: vec![
                warehouse(
                    "TX",
                    "Dallas - TX",
                    "America/Chicago",
                    32.7976639402147,
                    -97.03247275120683,
                ),
                warehouse(
                    "NY",
                    "Ronkonkoma - NY",
                    "America/New_York",
                    40.789462921604894,
                    -73.1232583,
                ),
                warehouse(
                    "NV",
                    "Sparks - NV",
                    "America/Los_Angeles",
                    39.524531234552406,
                    -119.74491373467194,
                ),
            ],
            schedules: vec![
                Schedule {
                    warehouse: "TX".to_string(),
                    methods: vec![
                        method(
                            "ltl",
                            "LTL Cutoff Time",
                            &["14:30"],
                            ltl_details,
                            &[
                                "Pending paperwork to Shipping Department by 2:30 PM (CST)",
                                "At 2:30 PM (CST) - Report number of remaining skids to Shipping Department",
                            ],
                        ),
                        method(
                            "fed_up",
                            "FedEx Cutoff Time",
                            &["15:00"],
                            &[],
                            &["Pending paperwork to Shipping Department by 3:00 PM (CST)"],
                        ),
                        method(
                            "ups",
                            "UPS & Freight Cutoff Time",
                            &["15:00"],
                            &[],
                            &["Pending paperwork to Shipping Department by 3:00 PM (CST)"],
                        ),
                        method(
                            "usps",
                            "USPS Cutoff Time",
                            &["11:00"],
                            &[],
                            &["Pending paperwork to Shipping Department by 11:00 AM (CST)"],
                        ),
                        method(
                            "cust_exp",
                            "Customer Pickups Cutoff Time",
                            &["16:30"],
                            &[],
                            &["Pickups must be between 8:30 AM - 4:30 PM (CST)"],
                        ),
                    ],
                },
                Schedule {
                    warehouse: "NY".to_string(),
                    methods: vec![
                        method(
                            "ltl",
                            "LTL Cutoff Time",
                            &["13:45"],
                            ltl_details,
                            &[
                                "Pending paperwork to Shipping Department by 1:45 PM (EST)",
                                "At 1:45 PM (EST) - Report number of remaining skids to Shipping Department",
                            ],
                        ),
                        method(
                            "fed_up",
                            "FedEx Ground & UPS Cutoff Time",
                            &["16:00"],
                            &[],
                            &["Pending paperwork to Shipping Department by 4:00 PM (EST)"],
                        ),
                        method(
                            "fed_exp",
                            "FedEx Express & Freight Cutoff Time",
                            &["12:00"],
                            &[],
                            &["Pending paperwork to Shipping Department by 12:00 PM (EST)"],
                        ),
                        method(
                            "cust_exp",
                            "Customer Pickups Cutoff Time",
                            &["16:30"],
                            &[],
                            &["Pickups must be between 8:30 AM - 4:30 PM (EST)"],
                        ),
                    ],
                },
                Schedule {
                    warehouse: "NV".to_string(),
                    methods: vec![
                        method(
                            "ltl",
                            "LTL Cutoff Time",
                            &["13:30"],
                            ltl_details,
                            &[
                                "Pending paperwork to Shipping Department by 1:30 PM (PST)",
                                "At 1:30 PM (PST) - Report number of remaining skids to Shipping Department",
                            ],
                        ),
                        method(
                            "fed_up",
                            "FedEx Ground Cutoff Time",
                            &["14:00"],
                            &[],
                            &["Pending paperwork to Shipping Department by 2:00 PM (PST)"],
                        ),
                        method(
                            "ups",
                            "UPS & Freight Cutoff Time",
                            &["14:00"],
                            &[],
                            &["Pending paperwork to Shipping Department by 2:00 PM (PST)"],
                        ),
                        method(
                            "usps",
                            "USPS Cutoff Time",
                            &["14:00"],
                            &[],
                            &["Pending paperwork to Shipping Department by 2:00 PM (PST)"],
                        ),
                        method(
                            "cust_exp",
                            "Customer Pickups Cutoff Time",
                            &["16:30"],
                            &[],
                            &["Pickups must be between 8:30 AM - 4:30 PM (PST)"],
                        ),
                    ],
                },
            ],
        }
    }
}

fn warehouse(code: &str, name: &str, zone: &str, latitude: f64, longitude: f64) -> Warehouse {
    Warehouse {
        code: code.to_string(),
        name: name.to_string(),
        zone: zone.to_string(),
        latitude,
        longitude,
    }
}

fn method(
    id: &str,
    title: &str,
    cutoffs: &[&str],
    details: &[&str],
    notes: &[&str],
) -> ShippingMethod {
    let strings = |items: &[&str]| items.iter().map(|item| item.to_string()).collect();
    ShippingMethod {
        id: id.to_string(),
        title: title.to_string(),
        cutoffs: strings(cutoffs),
        details: strings(details),
        notes: strings(notes),
    }
}
