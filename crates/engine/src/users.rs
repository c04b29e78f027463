//! Users of the service.
//!
//! There is no sign-up: development users are seeded by the migration and
//! picked through the identity headers.

use sea_orm::entity::prelude::*;

use crate::{EngineError, ResultEngine, Role};

/// The user performing an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl Actor {
    /// Fails with `Forbidden` unless the actor has `role`.
    pub fn require_role(&self, role: Role) -> ResultEngine<()> {
        if self.role != role {
            return Err(EngineError::Forbidden(format!(
                "{} role required",
                role.as_str().to_lowercase()
            )));
        }
        Ok(())
    }
}

impl TryFrom<Model> for Actor {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            role: model.role.parse()?,
            id: model.id,
            full_name: model.full_name,
            email: model.email,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::expenses::Entity")]
    Expenses,
}

impl Related<super::expenses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expenses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(role: &str) -> Model {
        Model {
            id: 3,
            full_name: "Robert Taylor".to_string(),
            email: "robert.taylor@company.com".to_string(),
            role: role.to_string(),
        }
    }

    #[test]
    fn actor_from_model() {
        let actor = Actor::try_from(model("MANAGER")).unwrap();
        assert_eq!(actor.role, Role::Manager);
        assert!(actor.require_role(Role::Manager).is_ok());
        assert!(matches!(
            actor.require_role(Role::Finance),
            Err(EngineError::Forbidden(_))
        ));
    }

    #[test]
    fn unknown_stored_role_is_rejected() {
        assert!(matches!(
            Actor::try_from(model("ADMIN")),
            Err(EngineError::InvalidRole(_))
        ));
    }
}
