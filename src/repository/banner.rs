use diesel::prelude::*;

use crate::{
    domain::banner::{
        Banner as DomainBanner, NewBanner as DomainNewBanner, UpdateBanner as DomainUpdateBanner,
    },
    models::banner::{
        Banner as DbBanner, NewBanner as DbNewBanner, UpdateBanner as DbUpdateBanner,
    },
    repository::{BannerReader, BannerWriter, DieselRepository, RepositoryError, RepositoryResult},
};

impl BannerReader for DieselRepository {
    fn get_banner_by_id(&self, id: i32) -> RepositoryResult<Option<DomainBanner>> {
        use crate::schema::banners;

        let mut conn = self.conn()?;
        let banner = banners::table
            .filter(banners::id.eq(id))
            .first::<DbBanner>(&mut conn)
            .optional()?;

        Ok(banner.map(Into::into))
    }

    fn list_banners(&self, only_active: bool) -> RepositoryResult<Vec<DomainBanner>> {
        use crate::schema::banners;

        let mut conn = self.conn()?;

        let mut query = banners::table.into_boxed::<diesel::sqlite::Sqlite>();
        if only_active {
            query = query.filter(banners::is_active.eq(true));
        }

        let rows = query
            .order(banners::created_at.desc())
            .load::<DbBanner>(&mut conn)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

impl BannerWriter for DieselRepository {
    fn create_banner(&self, new_banner: &DomainNewBanner) -> RepositoryResult<DomainBanner> {
        use crate::schema::banners;

        let mut conn = self.conn()?;
        let db_new = DbNewBanner::from(new_banner);

        let created = diesel::insert_into(banners::table)
            .values(&db_new)
            .get_result::<DbBanner>(&mut conn)?;

        Ok(created.into())
    }

    fn update_banner(
        &self,
        banner_id: i32,
        updates: &DomainUpdateBanner,
    ) -> RepositoryResult<DomainBanner> {
        use crate::schema::banners;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateBanner::from(updates);

        let updated = diesel::update(banners::table.filter(banners::id.eq(banner_id)))
            .set(&db_updates)
            .get_result::<DbBanner>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_banner(&self, banner_id: i32) -> RepositoryResult<()> {
        use crate::schema::banners;

        let mut conn = self.conn()?;

        let deleted = diesel::delete(banners::table.filter(banners::id.eq(banner_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
