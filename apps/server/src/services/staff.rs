//! Staff account management and credential verification.

use std::sync::Arc;

use crate::{
    auth,
    config::Config,
    db::staff::{StaffRepository, StaffWrite},
    models::staff::{ChangePasswordRequest, CreateStaffRequest, LoginRequest, Staff},
    Error, Result,
};

#[derive(Clone)]
pub struct StaffService {
    repo: StaffRepository,
    config: Arc<Config>,
}

impl StaffService {
    pub fn new(repo: StaffRepository, config: Arc<Config>) -> Self {
        Self { repo, config }
    }

    /// Verify credentials and issue an access token.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn login(&self, req: &LoginRequest) -> Result<String> {
        let invalid = || Error::Unauthorized("invalid username or password".to_string());

        let staff = self
            .repo
            .find_by_username(&req.username)
            .await?
            .ok_or_else(invalid)?;

        if !auth::verify_password(&req.password, &staff.password_hash) {
            return Err(invalid());
        }

        auth::sign_token(&self.config.auth, &staff)
    }

    /// Create a staff account with the configured initial password.
    pub async fn create(&self, req: &CreateStaffRequest) -> Result<Staff> {
        let default_password = &self.config.auth.default_staff_password;
        if default_password.is_empty() {
            return Err(Error::Internal(
                "auth.default_staff_password is not configured".to_string(),
            ));
        }
        let password_hash = auth::hash_password(default_password);

        let write = StaffWrite {
            clinic_id: req.clinic_id,
            username: req.username.clone(),
            name: req.name.clone(),
            status: req.status.clone(),
            role: req.role,
        };

        self.repo.create(&write, &password_hash).await
    }

    pub async fn change_password(&self, staff_id: i32, req: &ChangePasswordRequest) -> Result<()> {
        let staff = self
            .repo
            .find(staff_id)
            .await?
            .ok_or_else(|| Error::not_found("staff"))?;

        if !auth::verify_password(&req.old_password, &staff.password_hash) {
            return Err(Error::Unauthorized("old password does not match".to_string()));
        }

        let password_hash = auth::hash_password(&req.new_password);
        if !self.repo.update_password(staff_id, &password_hash).await? {
            return Err(Error::not_found("staff"));
        }
        Ok(())
    }
}
