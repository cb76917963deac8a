use std::fmt;

use allocation::InvestorId;
use axum_login::AuthUser;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::domain::models::UserId;

/// What a signed-in user is.
///
/// An investor is always tied to exactly one contribution in the project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Management,
    Investor(InvestorId),
}

impl Role {
    pub fn name(&self) -> &'static str {
        match self {
            Role::Management => "management",
            Role::Investor(_) => "investor",
        }
    }

    pub fn investor_id(&self) -> Option<InvestorId> {
        match self {
            Role::Management => None,
            Role::Investor(id) => Some(*id),
        }
    }

    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            Role::Management => vec![
                Permission::ViewAllResults,
                Permission::EditProject,
                Permission::ManageInvestors,
                Permission::SaveProject,
            ],
            Role::Investor(_) => vec![Permission::ViewOwnResults],
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Management => write!(f, "management"),
            Role::Investor(id) => write!(f, "investor({id})"),
        }
    }
}

#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Permission {
    ViewAllResults,
    ViewOwnResults,
    EditProject,
    ManageInvestors,
    SaveProject,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub role: Role,
    pub name: String,
    pub mobile_number: String,
    #[serde(skip)]
    pub password: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("name", &self.name)
            .field("mobile_number", &self.mobile_number)
            .field("password", &"[redacted]")
            .finish()
    }
}

impl AuthUser for User {
    type Id = i64;

    fn id(&self) -> Self::Id {
        self.id.as_i32().into()
    }

    fn session_auth_hash(&self) -> &[u8] {
        self.password.as_bytes()
    }
}
