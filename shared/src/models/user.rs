//! User accounts, roles, and the role capability map

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A platform user account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Customer account linked to a customer-role user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
}

/// Dashboard roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Sales,
    Warehouse,
    Customer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Admin => "admin",
            Role::Sales => "sales",
            Role::Warehouse => "warehouse",
            Role::Customer => "customer",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "sales" => Ok(Role::Sales),
            "warehouse" => Ok(Role::Warehouse),
            "customer" => Ok(Role::Customer),
            _ => Err(()),
        }
    }
}

/// Resources that can be accessed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Items,
    Orders,
    Quotations,
    Warehouse,
    Customers,
    Dashboard,
}

/// Actions that can be performed on resources
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Role {
    /// Whether this role may perform `action` on `resource`.
    ///
    /// Evaluated before every mutating call; admin holds every capability.
    pub fn permits(self, resource: Resource, action: Action) -> bool {
        use Action::*;
        use Resource::*;
        match self {
            Role::Admin => true,
            Role::Sales => match resource {
                Items => action == View,
                Orders | Quotations | Customers => true,
                Dashboard => action == View,
                Warehouse => action == View,
            },
            Role::Warehouse => match resource {
                Items => matches!(action, View | Create | Edit),
                Warehouse => true,
                Orders | Dashboard => action == View,
                Quotations | Customers => false,
            },
            Role::Customer => match resource {
                Items => action == View,
                Orders | Quotations => matches!(action, View | Create),
                Warehouse | Customers | Dashboard => false,
            },
        }
    }
}
