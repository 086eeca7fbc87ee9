//! # Access Control
//!
//! A single pure predicate deciding who may do what. Every mutation path
//! in the catalog funnels through [`authorize`] before touching storage.
//!
//! ## Rule Table
//! ```text
//! ┌───────────────┬─────────┬────────────────┬───────────────┬───────────┐
//! │ Action        │ Admin   │ ProductManager │ SalesManager  │ Anonymous │
//! ├───────────────┼─────────┼────────────────┼───────────────┼───────────┤
//! │ read product  │ yes     │ yes            │ yes           │ yes       │
//! │ create product│ yes     │ yes            │ no            │ no        │
//! │ edit product  │ yes     │ yes            │ no            │ no        │
//! │ delete product│ yes     │ no             │ no            │ no        │
//! │ create batch  │ yes     │ yes            │ yes           │ no        │
//! │ read batch    │ yes     │ own only       │ own only      │ no        │
//! │ edit batch    │ yes     │ own only       │ own only      │ no        │
//! │ delete batch  │ yes     │ own only       │ own only      │ no        │
//! └───────────────┴─────────┴────────────────┴───────────────┴───────────┘
//! ```
//! Guest accounts follow the same "own only" batch rules as the manager
//! roles: any authenticated user owns their drafts and nobody else's.
//!
//! Ownership means the batch's `manager_id` equals the actor's user id.
//! Admin bypasses ownership entirely.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Role, User};

/// Every operation the catalog gates on a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Action {
    ReadProduct,
    CreateProduct,
    EditProduct,
    DeleteProduct,
    CreateBatch,
    ReadBatch,
    EditBatch,
    DeleteBatch,
}

impl Action {
    /// Human-readable label used in denial messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ReadProduct => "read product",
            Action::CreateProduct => "create product",
            Action::EditProduct => "edit product",
            Action::DeleteProduct => "delete product",
            Action::CreateBatch => "create batch",
            Action::ReadBatch => "read batch",
            Action::EditBatch => "edit batch",
            Action::DeleteBatch => "delete batch",
        }
    }

    /// Whether this action needs a batch owner to decide.
    fn is_owner_scoped(&self) -> bool {
        matches!(
            self,
            Action::ReadBatch | Action::EditBatch | Action::DeleteBatch
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns whether `actor` may perform `action`.
///
/// `actor` is `None` for unauthenticated requests. `owner_id` is the
/// owning manager's user id for batch-scoped actions and `None`
/// otherwise; passing `None` for an owner-scoped action denies everyone
/// but admin.
///
/// Pure and total: every (role, action) pair has an explicit answer.
pub fn can_perform(actor: Option<&User>, owner_id: Option<&str>, action: Action) -> bool {
    // The product catalog is public; everything else needs a login.
    let user = match actor {
        Some(user) => user,
        None => return action == Action::ReadProduct,
    };

    if user.role == Role::Admin {
        return true;
    }

    if action.is_owner_scoped() {
        return owner_id == Some(user.id.as_str());
    }

    match (user.role, action) {
        (_, Action::ReadProduct) => true,
        (_, Action::CreateBatch) => true,
        (Role::ProductManager, Action::CreateProduct | Action::EditProduct) => true,
        (Role::ProductManager, Action::DeleteProduct) => false,
        (Role::SalesManager | Role::Guest, _) => false,
        // Admin returned above; owner-scoped actions handled above.
        (Role::Admin, _) => true,
        (Role::ProductManager, _) => false,
    }
}

/// [`can_perform`] lifted into a `Result` for `?`-style call sites.
///
/// ## Example
/// ```rust
/// use fromagerie_core::access::{authorize, Action};
/// use fromagerie_core::types::{Role, User};
///
/// let manager = User::new("rivka", Role::SalesManager);
/// authorize(Some(&manager), Some(&manager.id), Action::DeleteBatch).unwrap();
/// assert!(authorize(Some(&manager), None, Action::DeleteProduct).is_err());
/// ```
pub fn authorize(actor: Option<&User>, owner_id: Option<&str>, action: Action) -> CoreResult<()> {
    if can_perform(actor, owner_id, action) {
        Ok(())
    } else {
        Err(CoreError::PermissionDenied {
            role: actor.map(|user| user.role),
            action,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User::new("someone", role)
    }

    #[test]
    fn test_admin_may_do_anything() {
        let admin = user(Role::Admin);
        let actions = [
            Action::ReadProduct,
            Action::CreateProduct,
            Action::EditProduct,
            Action::DeleteProduct,
            Action::CreateBatch,
            Action::ReadBatch,
            Action::EditBatch,
            Action::DeleteBatch,
        ];
        for action in actions {
            // Owner deliberately someone else: admin bypasses ownership.
            assert!(
                can_perform(Some(&admin), Some("other-user-id"), action),
                "admin denied {action}"
            );
        }
    }

    #[test]
    fn test_anonymous_may_only_read_products() {
        assert!(can_perform(None, None, Action::ReadProduct));

        for action in [
            Action::CreateProduct,
            Action::EditProduct,
            Action::DeleteProduct,
            Action::CreateBatch,
            Action::ReadBatch,
            Action::EditBatch,
            Action::DeleteBatch,
        ] {
            assert!(!can_perform(None, None, action), "anonymous allowed {action}");
        }
    }

    #[test]
    fn test_product_manager_edits_but_never_deletes_products() {
        let pm = user(Role::ProductManager);
        assert!(can_perform(Some(&pm), None, Action::CreateProduct));
        assert!(can_perform(Some(&pm), None, Action::EditProduct));
        assert!(!can_perform(Some(&pm), None, Action::DeleteProduct));
    }

    #[test]
    fn test_sales_manager_has_no_product_write_access() {
        let sm = user(Role::SalesManager);
        assert!(can_perform(Some(&sm), None, Action::ReadProduct));
        assert!(!can_perform(Some(&sm), None, Action::CreateProduct));
        assert!(!can_perform(Some(&sm), None, Action::EditProduct));
        assert!(!can_perform(Some(&sm), None, Action::DeleteProduct));
    }

    #[test]
    fn test_every_authenticated_role_may_create_batches() {
        for role in [Role::ProductManager, Role::SalesManager, Role::Guest] {
            let u = user(role);
            assert!(can_perform(Some(&u), None, Action::CreateBatch));
        }
    }

    #[test]
    fn test_batch_ownership_is_enforced() {
        let alice = User::new("alice", Role::SalesManager);
        let bob = User::new("bob", Role::SalesManager);

        for action in [Action::ReadBatch, Action::EditBatch, Action::DeleteBatch] {
            assert!(can_perform(Some(&alice), Some(&alice.id), action));
            assert!(!can_perform(Some(&alice), Some(&bob.id), action));
            // Missing owner denies non-admins.
            assert!(!can_perform(Some(&alice), None, action));
        }
    }

    #[test]
    fn test_authorize_reports_role_and_action() {
        let sm = user(Role::SalesManager);
        let err = authorize(Some(&sm), None, Action::DeleteProduct).unwrap_err();
        match err {
            CoreError::PermissionDenied { role, action } => {
                assert_eq!(role, Some(Role::SalesManager));
                assert_eq!(action, Action::DeleteProduct);
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = authorize(None, None, Action::ReadBatch).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Permission denied: an unauthenticated user may not read batch"
        );
    }
}
