// ── People and tenancy ──

use serde::{Deserialize, Serialize};

/// A collaborator who can withdraw tools from stock.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub registration: Option<String>,
    pub role: Option<String>,
    pub active: bool,
}

/// The authenticated account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
}

/// A customer/organization scope. Nearly every entity path and query
/// is implicitly scoped to the currently selected tenancy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tenancy {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
}

/// Metadata row for a file attached to an owning entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub owner_type: Option<String>,
    pub owner_id: Option<String>,
    pub url: Option<String>,
}
