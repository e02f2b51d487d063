//! Acting policy
//!
//! Decides who may drive a reservation through its transitions and who may
//! run the administrative bulk operations. The engine consults the policy
//! at every authorization point, so swapping the rules means swapping one
//! implementation.

use crate::db::models::User;

pub trait ActingPolicy: Send + Sync {
    /// May `acting` check out or return a reservation owned by `owner_id`?
    fn may_act_for(&self, acting: &User, owner_id: &str) -> bool;

    /// May `acting` run administrative operations such as the bulk clear?
    fn may_administer(&self, acting: &User) -> bool;
}

/// Default rules: users drive their own reservations, attendants may drive
/// anyone's and run administrative operations.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl ActingPolicy for RolePolicy {
    fn may_act_for(&self, acting: &User, owner_id: &str) -> bool {
        acting.id == owner_id || acting.role.is_attendant()
    }

    fn may_administer(&self, acting: &User) -> bool {
        acting.role.is_attendant()
    }
}
