// ── Wire-to-domain conversions ──
//
// Bridges materialized `almoxa_api::Resource` graphs into canonical
// domain types. Conversions are tolerant: missing attributes default,
// unparseable values drop to `None`, so a sparse include set never
// fails a whole listing.

use almoxa_api::Resource;
use chrono::{DateTime, Utc};

use crate::model::{
    Attachment, Collaborator, CostCenter, ItemGroup, Machine, Manufacturer, MovementDirection,
    MovementLine, OrderStatus, ProductionOrder, Provider, StockMovement, Tenancy, Tool, User,
};

// ── Helpers ────────────────────────────────────────────────────────

fn id_of(resource: &Resource) -> String {
    resource.id().unwrap_or_default().to_owned()
}

/// Parse an ISO-8601 datetime attribute, silently dropping bad values.
fn parse_datetime(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

// ── Catalog ────────────────────────────────────────────────────────

impl From<&Resource> for ItemGroup {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            description: r.attr_str("description").unwrap_or_default(),
        }
    }
}

impl From<&Resource> for Manufacturer {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            name: r.attr_str("name").unwrap_or_default(),
        }
    }
}

impl From<&Resource> for Tool {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            code: r.attr_str("code"),
            description: r.attr_str("description").unwrap_or_default(),
            unit: r.attr_str("unit"),
            stock_quantity: r.attr_f64("stock_quantity").unwrap_or(0.0),
            minimum_stock: r.attr_f64("minimum_stock").unwrap_or(0.0),
            pre_ordered: r.attr_bool("pre_ordered").unwrap_or(false),
            group: r.related_one("itemGroup").map(ItemGroup::from),
            manufacturer: r.related_one("manufacturer").map(Manufacturer::from),
        }
    }
}

impl From<&Resource> for Provider {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            name: r.attr_str("name").unwrap_or_default(),
            document: r.attr_str("document"),
            email: r.attr_str("email"),
            phone: r.attr_str("phone"),
        }
    }
}

// ── People ─────────────────────────────────────────────────────────

impl From<&Resource> for Collaborator {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            name: r.attr_str("name").unwrap_or_default(),
            email: r.attr_str("email"),
            registration: r.attr_str("registration"),
            role: r.attr_str("role"),
            active: r.attr_bool("active").unwrap_or(false),
        }
    }
}

impl From<&Resource> for User {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            name: r.attr_str("name").unwrap_or_default(),
            email: r.attr_str("email"),
        }
    }
}

impl From<&Resource> for Tenancy {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            name: r.attr_str("name").unwrap_or_default(),
            parent_id: r
                .value_at("parent.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
        }
    }
}

impl From<&Resource> for Attachment {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            file_name: r.attr_str("file_name").unwrap_or_default(),
            content_type: r.attr_str("content_type"),
            owner_type: r.attr_str("owner_type"),
            owner_id: r.attr_str("owner_id"),
            url: r.attr_str("url"),
        }
    }
}

// ── Production ─────────────────────────────────────────────────────

impl From<&Resource> for Machine {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            code: r.attr_str("code"),
            description: r.attr_str("description").unwrap_or_default(),
            sector: r.attr_str("sector"),
        }
    }
}

impl From<&Resource> for CostCenter {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            code: r.attr_str("code"),
            description: r.attr_str("description").unwrap_or_default(),
        }
    }
}

impl From<&Resource> for ProductionOrder {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            number: r.attr_str("number"),
            description: r.attr_str("description").unwrap_or_default(),
            status: r
                .attr_str("status")
                .map(|s| OrderStatus::from_wire(&s))
                .unwrap_or_default(),
            machine_id: r
                .value_at("machine.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            cost_center_id: r
                .value_at("costCenter.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            started_at: parse_datetime(r.attr_str("started_at")),
            finished_at: parse_datetime(r.attr_str("finished_at")),
        }
    }
}

// ── Movements ──────────────────────────────────────────────────────

impl From<&Resource> for MovementLine {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            item_id: r
                .value_at("item.id")
                .and_then(|v| v.as_str().map(str::to_owned))
                .or_else(|| r.attr_str("item_id")),
            quantity: r.attr_f64("quantity").unwrap_or(0.0),
            unit_price: r.attr_f64("unit_price"),
        }
    }
}

impl From<&Resource> for StockMovement {
    fn from(r: &Resource) -> Self {
        Self {
            id: id_of(r),
            direction: r
                .attr_str("direction")
                .and_then(|s| MovementDirection::from_wire(&s)),
            document: r.attr_str("document"),
            moved_at: parse_datetime(r.attr_str("moved_at")),
            cost_center_id: r
                .value_at("costCenter.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            provider_id: r
                .value_at("provider.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            collaborator_id: r
                .value_at("collaborator.id")
                .and_then(|v| v.as_str().map(str::to_owned)),
            lines: r.related_many("lines").iter().map(MovementLine::from).collect(),
        }
    }
}
