use diesel::prelude::*;

use crate::{
    domain::settings::{
        DefaultSettings, StoreSettings as DomainStoreSettings,
        UpdateStoreSettings as DomainUpdateStoreSettings,
    },
    models::settings::{
        NewStoreSettings as DbNewStoreSettings, StoreSettings as DbStoreSettings,
        UpdateStoreSettings as DbUpdateStoreSettings,
    },
    repository::{
        DieselRepository, RepositoryError, RepositoryResult, SettingsReader, SettingsWriter,
    },
};

impl SettingsReader for DieselRepository {
    fn get_settings(&self) -> RepositoryResult<Option<DomainStoreSettings>> {
        use crate::schema::store_settings;

        let mut conn = self.conn()?;
        let settings = store_settings::table
            .order(store_settings::id.asc())
            .first::<DbStoreSettings>(&mut conn)
            .optional()?;

        Ok(settings.map(Into::into))
    }
}

impl SettingsWriter for DieselRepository {
    fn ensure_settings(&self, defaults: &DefaultSettings) -> RepositoryResult<DomainStoreSettings> {
        use crate::schema::store_settings;

        let mut conn = self.conn()?;

        conn.transaction::<DomainStoreSettings, RepositoryError, _>(|conn| {
            let existing = store_settings::table
                .order(store_settings::id.asc())
                .first::<DbStoreSettings>(conn)
                .optional()?;

            if let Some(settings) = existing {
                return Ok(settings.into());
            }

            let created = diesel::insert_into(store_settings::table)
                .values(DbNewStoreSettings::from(defaults))
                .get_result::<DbStoreSettings>(conn)?;

            Ok(created.into())
        })
    }

    fn update_settings(
        &self,
        updates: &DomainUpdateStoreSettings,
    ) -> RepositoryResult<DomainStoreSettings> {
        use crate::schema::store_settings;

        let mut conn = self.conn()?;

        conn.transaction::<DomainStoreSettings, RepositoryError, _>(|conn| {
            let existing = store_settings::table
                .order(store_settings::id.asc())
                .first::<DbStoreSettings>(conn)
                .optional()?
                .ok_or(RepositoryError::NotFound)?;

            let db_updates = DbUpdateStoreSettings::from(updates);

            let updated = diesel::update(
                store_settings::table.filter(store_settings::id.eq(existing.id)),
            )
            .set(&db_updates)
            .get_result::<DbStoreSettings>(conn)?;

            Ok(updated.into())
        })
    }
}
