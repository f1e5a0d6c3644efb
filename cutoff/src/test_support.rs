//! Test-only helpers for constructing catalog fixtures.

use crate::core::catalog::{Catalog, Schedule, ShippingMethod, Warehouse};

/// Create a warehouse with a deterministic display name.
pub fn warehouse(code: &str, zone: &str, latitude: f64, longitude: f64) -> Warehouse {
    Warehouse {
        code: code.to_string(),
        name: format!("{code} warehouse"),
        zone: zone.to_string(),
        latitude,
        longitude,
    }
}

/// Create a method with deterministic title and no details or notes.
pub fn method(id: &str, cutoffs: &[&str]) -> ShippingMethod {
    ShippingMethod {
        id: id.to_string(),
        title: format!("{id} cutoff"),
        cutoffs: cutoffs.iter().map(|cutoff| cutoff.to_string()).collect(),
        details: Vec::new(),
        notes: Vec::new(),
    }
}

pub fn schedule(warehouse: &str, methods: Vec<ShippingMethod>) -> Schedule {
    Schedule {
        warehouse: warehouse.to_string(),
        methods,
    }
}

pub fn catalog(warehouses: Vec<Warehouse>, schedules: Vec<Schedule>) -> Catalog {
    Catalog {
        warehouses,
        schedules,
    }
}
