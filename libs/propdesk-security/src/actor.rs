use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    Admin,
    Member,
}

/// Identity attributes of the caller, as returned by the actor directory.
///
/// `writable_tenant_ids` must be a subset of `readable_tenant_ids`, and the
/// home `tenant_id`, when set, must be readable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorAttributes {
    pub actor_id: String,
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub tenant_id: Option<Uuid>,
    #[serde(default)]
    pub readable_tenant_ids: Vec<Uuid>,
    #[serde(default)]
    pub writable_tenant_ids: Vec<Uuid>,
}

impl ActorAttributes {
    #[must_use]
    pub fn new(actor_id: impl Into<String>) -> Self {
        Self {
            actor_id: actor_id.into(),
            roles: Vec::new(),
            tenant_id: None,
            readable_tenant_ids: Vec::new(),
            writable_tenant_ids: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Set the home tenant; it becomes readable and writable.
    #[must_use]
    pub fn with_tenant(mut self, tenant_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self.with_writable(tenant_id)
    }

    #[must_use]
    pub fn with_readable(mut self, tenant_id: Uuid) -> Self {
        if !self.readable_tenant_ids.contains(&tenant_id) {
            self.readable_tenant_ids.push(tenant_id);
        }
        self
    }

    /// Writable tenants are readable as well.
    #[must_use]
    pub fn with_writable(mut self, tenant_id: Uuid) -> Self {
        if !self.writable_tenant_ids.contains(&tenant_id) {
            self.writable_tenant_ids.push(tenant_id);
        }
        self.with_readable(tenant_id)
    }

    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Every tenant id the attributes mention.
    pub fn tenant_ids(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.tenant_id
            .iter()
            .chain(&self.readable_tenant_ids)
            .chain(&self.writable_tenant_ids)
            .copied()
    }

    /// Check the tenant-list invariants.
    ///
    /// # Errors
    /// Returns a description of the first violated invariant.
    pub fn check_consistency(&self) -> Result<(), String> {
        if let Some(tenant) = self.tenant_id
            && !self.readable_tenant_ids.contains(&tenant)
        {
            return Err(format!("home tenant {tenant} is not readable"));
        }
        if let Some(tenant) = self
            .writable_tenant_ids
            .iter()
            .find(|t| !self.readable_tenant_ids.contains(t))
        {
            return Err(format!("tenant {tenant} is writable but not readable"));
        }
        Ok(())
    }
}
