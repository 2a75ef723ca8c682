use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::model::user::{EmployeeId, FingerprintId, NewUser, USER_HEADERS, User};
use crate::utils::csv_utils::{read_table, write_table};
use crate::utils::names::normalize_required;
use crate::utils::time_policy::truncate;

/// Users table: loaded once, rewritten in full after every change.
#[derive(Debug)]
pub struct UserStore {
    path: PathBuf,
    users: Mutex<Vec<User>>,
}

impl UserStore {
    pub fn open(path: impl Into<PathBuf>) -> LedgerResult<Self> {
        let path = path.into();
        let users = read_table::<User>(&path, USER_HEADERS)?;
        debug!(path = %path.display(), count = users.len(), "users loaded");

        Ok(Self {
            path,
            users: Mutex::new(users),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn enroll(&self, new_user: &NewUser, now: NaiveDateTime) -> LedgerResult<User> {
        let user = User {
            employee_id: EmployeeId::parse(&new_user.employee_id)?,
            first_name: normalize_required("first_name", &new_user.first_name)?,
            last_name: normalize_required("last_name", &new_user.last_name)?,
            fingerprint_id: FingerprintId::parse(&new_user.fingerprint_id)?,
            is_disabled: false,
            created_at: truncate(now),
        };

        self.mutate(|users| {
            let taken = users.iter().any(|u| {
                u.fingerprint_id == user.fingerprint_id || u.employee_id == user.employee_id
            });
            if taken {
                return Err(LedgerError::DuplicateUser);
            }
            users.push(user.clone());
            Ok(())
        })?;

        info!(
            employee_id = %user.employee_id,
            fingerprint_id = %user.fingerprint_id,
            "user enrolled"
        );
        Ok(user)
    }

    pub fn all(&self) -> LedgerResult<Vec<User>> {
        let users = self.users.lock()?;
        if users.is_empty() {
            return Err(LedgerError::EmptyStore);
        }
        Ok(users.clone())
    }

    pub fn get(&self, fingerprint_id: &FingerprintId) -> LedgerResult<User> {
        self.users
            .lock()?
            .iter()
            .find(|u| &u.fingerprint_id == fingerprint_id)
            .cloned()
            .ok_or(LedgerError::UserNotFound)
    }

    pub fn find_by_employee_id(&self, employee_id: &EmployeeId) -> LedgerResult<User> {
        self.users
            .lock()?
            .iter()
            .find(|u| &u.employee_id == employee_id)
            .cloned()
            .ok_or(LedgerError::UserNotFound)
    }

    pub fn delete(&self, fingerprint_id: &FingerprintId) -> LedgerResult<User> {
        let removed = self.mutate(|users| {
            let idx = users
                .iter()
                .position(|u| &u.fingerprint_id == fingerprint_id)
                .ok_or(LedgerError::UserNotFound)?;
            Ok(users.remove(idx))
        })?;

        info!(employee_id = %removed.employee_id, %fingerprint_id, "user deleted");
        Ok(removed)
    }

    /// Flip `is_disabled`; asking for the state the user is already in is an error.
    pub fn set_disabled(&self, fingerprint_id: &FingerprintId, disabled: bool) -> LedgerResult<User> {
        let user = self.mutate(|users| {
            let user = users
                .iter_mut()
                .find(|u| &u.fingerprint_id == fingerprint_id)
                .ok_or(LedgerError::UserNotFound)?;
            if user.is_disabled == disabled {
                return Err(LedgerError::AlreadyInState {
                    state: user.state_label(),
                });
            }
            user.is_disabled = disabled;
            Ok(user.clone())
        })?;

        info!(employee_id = %user.employee_id, %fingerprint_id, state = user.state_label(), "user state changed");
        Ok(user)
    }

    /// Run `f` on a copy of the table under the lock; the copy replaces the
    /// table only once it has been written to disk.
    fn mutate<T>(&self, f: impl FnOnce(&mut Vec<User>) -> LedgerResult<T>) -> LedgerResult<T> {
        let mut users = self.users.lock()?;
        let mut next = users.clone();
        let out = f(&mut next)?;
        write_table(&self.path, USER_HEADERS, &next)?;
        *users = next;
        Ok(out)
    }
}
