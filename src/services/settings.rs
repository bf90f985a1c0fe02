use crate::domain::auth::AuthenticatedUser;
use crate::domain::settings::{DefaultSettings, StoreSettings};
use crate::forms::settings::EditSettingsForm;
use crate::repository::{SettingsReader, SettingsWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Loads the settings row for the back-office page, creating defaults when
/// the store has never been configured.
pub fn load_settings_page<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<StoreSettings>
where
    R: SettingsReader + SettingsWriter + ?Sized,
{
    ensure_admin(user)?;
    load_settings_row(repo)
}

pub fn update_settings<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditSettingsForm,
) -> ServiceResult<StoreSettings>
where
    R: SettingsReader + SettingsWriter + ?Sized,
{
    ensure_admin(user)?;

    let updates = form
        .into_update_settings()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    // The row must exist before a patch can be applied.
    load_settings_row(repo)?;

    repo.update_settings(&updates).map_err(ServiceError::from)
}

fn load_settings_row<R>(repo: &R) -> ServiceResult<StoreSettings>
where
    R: SettingsReader + SettingsWriter + ?Sized,
{
    match repo.get_settings().map_err(ServiceError::from)? {
        Some(settings) => Ok(settings),
        None => repo
            .ensure_settings(&DefaultSettings::default())
            .map_err(ServiceError::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::settings::UpdateStoreSettings;
    use crate::repository::mock::{MockSettingsReader, MockSettingsWriter};
    use crate::repository::RepositoryResult;
    use crate::{ADMIN_ROLE, CUSTOMER_ROLE};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 1,
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: ADMIN_ROLE.to_string(),
        }
    }

    fn customer() -> AuthenticatedUser {
        AuthenticatedUser {
            id: 7,
            name: "Ama".to_string(),
            email: "ama@example.com".to_string(),
            role: CUSTOMER_ROLE.to_string(),
        }
    }

    fn sample_settings() -> StoreSettings {
        StoreSettings {
            id: 1,
            store_name: "Parfumerie".to_string(),
            currency: "GHS".to_string(),
            shipping_fee_cents: 0,
            maintenance_mode: false,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    struct FakeRepo {
        settings_reader: MockSettingsReader,
        settings_writer: MockSettingsWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                settings_reader: MockSettingsReader::new(),
                settings_writer: MockSettingsWriter::new(),
            }
        }
    }

    impl SettingsReader for FakeRepo {
        fn get_settings(&self) -> RepositoryResult<Option<StoreSettings>> {
            self.settings_reader.get_settings()
        }
    }

    impl SettingsWriter for FakeRepo {
        fn ensure_settings(&self, defaults: &DefaultSettings) -> RepositoryResult<StoreSettings> {
            self.settings_writer.ensure_settings(defaults)
        }

        fn update_settings(
            &self,
            updates: &UpdateStoreSettings,
        ) -> RepositoryResult<StoreSettings> {
            self.settings_writer.update_settings(updates)
        }
    }

    #[test]
    fn settings_page_requires_the_admin_role() {
        let repo = FakeRepo::new();

        let result = load_settings_page(&repo, &customer());

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn missing_settings_row_is_created_with_defaults() {
        let mut repo = FakeRepo::new();
        repo.settings_reader
            .expect_get_settings()
            .returning(|| Ok(None));
        repo.settings_writer
            .expect_ensure_settings()
            .times(1)
            .withf(|defaults| {
                assert_eq!(defaults.currency, "GHS");
                true
            })
            .returning(|_| Ok(sample_settings()));

        let settings = load_settings_page(&repo, &admin()).expect("expected defaults");
        assert_eq!(settings.store_name, "Parfumerie");
    }

    #[test]
    fn update_applies_the_patch() {
        let mut repo = FakeRepo::new();
        repo.settings_reader
            .expect_get_settings()
            .returning(|| Ok(Some(sample_settings())));
        repo.settings_writer
            .expect_update_settings()
            .times(1)
            .withf(|updates| {
                assert_eq!(updates.shipping_fee_cents, Some(1_500));
                true
            })
            .returning(|_| {
                let mut settings = sample_settings();
                settings.shipping_fee_cents = 1_500;
                Ok(settings)
            });

        let form = EditSettingsForm {
            store_name: None,
            currency: None,
            shipping_fee_cents: Some(1_500),
            maintenance_mode: None,
        };

        let settings = update_settings(&repo, &admin(), form).expect("expected success");
        assert_eq!(settings.shipping_fee_cents, 1_500);
    }
}
