use error_stack::Report;
use vodca::References;

use crate::entity::{IsAdmin, User, UserId};
use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub enum Role {
    User,
    Admin,
}

/// Who is calling, as recovered from a verified credential.
#[derive(Debug, Clone, Eq, PartialEq, References)]
pub struct Identity {
    user_id: UserId,
    is_admin: IsAdmin,
}

impl Identity {
    pub fn new(user_id: UserId, is_admin: IsAdmin) -> Self {
        Self { user_id, is_admin }
    }

    pub fn role(&self) -> Role {
        if *self.is_admin.as_ref() {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn authorize(&self, required: Role) -> Result<(), Report<KernelError>> {
        if self.role() >= required {
            Ok(())
        } else {
            Err(KernelError::Forbidden.with_message("Access denied."))
        }
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self::new(*user.id(), *user.is_admin())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{Identity, IsAdmin, Role, UserId};
    use crate::KernelError;

    #[test]
    fn admin_passes_every_role() {
        let admin = Identity::new(UserId::new(Uuid::new_v4()), IsAdmin::new(true));
        assert!(admin.authorize(Role::User).is_ok());
        assert!(admin.authorize(Role::Admin).is_ok());
    }

    #[test]
    fn user_is_forbidden_from_admin_role() {
        let user = Identity::new(UserId::new(Uuid::new_v4()), IsAdmin::new(false));
        assert!(user.authorize(Role::User).is_ok());
        let report = user.authorize(Role::Admin).expect_err("not an admin");
        assert_eq!(report.current_context(), &KernelError::Forbidden);
    }
}
