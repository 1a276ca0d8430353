use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Patient; the default for self-registered accounts.
    #[default]
    User,
    Nutritionist,
    Admin,
    Owner,
    Operator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Nutritionist => "nutritionist",
            Role::Admin => "admin",
            Role::Owner => "owner",
            Role::Operator => "operator",
        }
    }

    /// Unknown values degrade to the least privileged role.
    pub fn from_db(value: &str) -> Self {
        match value {
            "nutritionist" => Role::Nutritionist,
            "admin" => Role::Admin,
            "owner" => Role::Owner,
            "operator" => Role::Operator,
            _ => Role::User,
        }
    }
}

/// Things a caller may ask to touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    OwnMeals,
    OwnProfile,
    CatalogRead,
    CatalogWrite,
    PatientSummaries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

pub fn authorize(role: Role, resource: Resource) -> Access {
    let allowed = match resource {
        Resource::OwnMeals | Resource::OwnProfile | Resource::CatalogRead => true,
        Resource::CatalogWrite => matches!(role, Role::Admin | Role::Owner | Role::Operator),
        Resource::PatientSummaries => {
            matches!(role, Role::Nutritionist | Role::Admin | Role::Owner)
        }
    };
    if allowed {
        Access::Allow
    } else {
        Access::Deny
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ROLES: [Role; 5] = [
        Role::User,
        Role::Nutritionist,
        Role::Admin,
        Role::Owner,
        Role::Operator,
    ];

    #[test]
    fn everyone_reaches_their_own_data_and_the_catalog() {
        for role in ALL_ROLES {
            for resource in [Resource::OwnMeals, Resource::OwnProfile, Resource::CatalogRead] {
                assert_eq!(authorize(role, resource), Access::Allow, "{role:?} {resource:?}");
            }
        }
    }

    #[test]
    fn catalog_writes_are_staff_only() {
        assert_eq!(authorize(Role::User, Resource::CatalogWrite), Access::Deny);
        assert_eq!(authorize(Role::Nutritionist, Resource::CatalogWrite), Access::Deny);
        assert_eq!(authorize(Role::Admin, Resource::CatalogWrite), Access::Allow);
        assert_eq!(authorize(Role::Owner, Resource::CatalogWrite), Access::Allow);
        assert_eq!(authorize(Role::Operator, Resource::CatalogWrite), Access::Allow);
    }

    #[test]
    fn patient_summaries_need_a_clinical_or_owner_role() {
        assert_eq!(authorize(Role::User, Resource::PatientSummaries), Access::Deny);
        assert_eq!(authorize(Role::Operator, Resource::PatientSummaries), Access::Deny);
        assert_eq!(authorize(Role::Nutritionist, Resource::PatientSummaries), Access::Allow);
        assert_eq!(authorize(Role::Admin, Resource::PatientSummaries), Access::Allow);
        assert_eq!(authorize(Role::Owner, Resource::PatientSummaries), Access::Allow);
    }

    #[test]
    fn role_round_trips_through_its_db_form() {
        for role in ALL_ROLES {
            assert_eq!(Role::from_db(role.as_str()), role);
        }
        assert_eq!(Role::from_db("superuser"), Role::User);
    }
}
