//! Tiered access control.
//!
//! Roles are compared by rank rather than by membership in a particular set,
//! so a call gated on [`Role::Admin`] also accepts super-admins and the owner.

use frame_support::{ensure, pallet_prelude::*};
use frame_system::{ensure_signed, pallet_prelude::OriginFor};

use crate::{Admins, Config, Error, Owner, Pallet, SuperAdmins};

/// Privilege level of an account, ordered `None < Admin < SuperAdmin < Owner`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, RuntimeDebug)]
pub enum Role {
    None,
    Admin,
    SuperAdmin,
    Owner,
}

impl<T: Config> Pallet<T> {
    /// Highest role held by `who`.
    pub fn role_of(who: &T::AccountId) -> Role {
        if Owner::<T>::get().as_ref() == Some(who) {
            Role::Owner
        } else if SuperAdmins::<T>::get(who) {
            Role::SuperAdmin
        } else if Admins::<T>::get(who) {
            Role::Admin
        } else {
            Role::None
        }
    }

    /// Ensure the origin is signed by an account holding at least `minimum`.
    pub(crate) fn ensure_role(
        origin: OriginFor<T>,
        minimum: Role,
    ) -> Result<T::AccountId, DispatchError> {
        let who = ensure_signed(origin)?;
        let role = Self::role_of(&who);
        if role < minimum {
            log::debug!(
                target: crate::LOG_TARGET,
                "{who:?} holds {role:?}, {minimum:?} required"
            );
        }
        ensure!(role >= minimum, Error::<T>::Unauthorized);
        Ok(who)
    }
}
