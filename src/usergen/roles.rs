use crate::error::Result;
use crate::model::Role;

/// Source of the role table a purge walks through.
pub trait RoleRegistry {
    /// All roles, in the order the platform registered them
    fn roles(&self) -> Result<Vec<Role>>;
}

/// Role table taken from configuration.
#[derive(Debug, Clone)]
pub struct ConfiguredRoles {
    roles: Vec<Role>,
}

impl ConfiguredRoles {
    pub fn new(roles: Vec<Role>) -> Self {
        Self { roles }
    }
}

impl Default for ConfiguredRoles {
    fn default() -> Self {
        Self::new(stock_roles())
    }
}

impl RoleRegistry for ConfiguredRoles {
    fn roles(&self) -> Result<Vec<Role>> {
        Ok(self.roles.clone())
    }
}

/// The five roles a fresh WordPress install ships with.
pub fn stock_roles() -> Vec<Role> {
    vec![
        Role::new("administrator", "Administrator"),
        Role::new("editor", "Editor"),
        Role::new("author", "Author"),
        Role::new("contributor", "Contributor"),
        Role::new("subscriber", "Subscriber"),
    ]
}

/// Every role except `admin_role`, order preserved.
pub fn purgeable_roles<R: RoleRegistry + ?Sized>(
    registry: &R,
    admin_role: &str,
) -> Result<Vec<Role>> {
    Ok(registry
        .roles()?
        .into_iter()
        .filter(|role| role.key != admin_role)
        .collect())
}
