// ── Domain model ──
//
// Canonical in-memory types consumers work with, converted from wire
// resources in `convert.rs`. Wire looseness (string-encoded numbers,
// missing fields) is absorbed at conversion time, never here.

pub mod catalog;
pub mod movement;
pub mod people;
pub mod production;

pub use catalog::{ItemGroup, Manufacturer, Provider, Tool};
pub use movement::{MovementDirection, MovementLine, StockMovement};
pub use people::{Attachment, Collaborator, Tenancy, User};
pub use production::{CostCenter, Machine, OrderStatus, ProductionOrder};
