// almoxa-core: Domain layer between almoxa-api and consumers (CLI).

pub mod convert;
pub mod error;
pub mod model;
pub mod report;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use report::{CostCenterUsage, DashboardReport, build_dashboard};
pub use session::SessionState;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Catalog
    ItemGroup, Manufacturer, Provider, Tool,
    // Movements
    MovementDirection, MovementLine, StockMovement,
    // People / tenancy
    Attachment, Collaborator, Tenancy, User,
    // Production
    CostCenter, Machine, OrderStatus, ProductionOrder,
};
