use crate::domain::auth::AuthenticatedUser;
use crate::domain::banner::Banner;
use crate::forms::banners::{AddBannerForm, EditBannerForm};
use crate::repository::{BannerReader, BannerWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Loads every banner, active or not, for the back-office table.
pub fn load_banners_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Banner>>
where
    R: BannerReader + ?Sized,
{
    ensure_admin(user)?;
    repo.list_banners(false).map_err(ServiceError::from)
}

pub fn create_banner<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddBannerForm,
) -> ServiceResult<Banner>
where
    R: BannerWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_banner = form
        .into_new_banner()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_banner(&new_banner).map_err(ServiceError::from)
}

pub fn update_banner<R>(
    repo: &R,
    user: &AuthenticatedUser,
    banner_id: i32,
    form: EditBannerForm,
) -> ServiceResult<Banner>
where
    R: BannerWriter + ?Sized,
{
    ensure_admin(user)?;

    let updates = form
        .into_update_banner()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_banner(banner_id, &updates)
        .map_err(ServiceError::from)
}

pub fn delete_banner<R>(repo: &R, user: &AuthenticatedUser, banner_id: i32) -> ServiceResult<()>
where
    R: BannerWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.delete_banner(banner_id).map_err(ServiceError::from)
}
