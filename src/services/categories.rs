use crate::domain::auth::AuthenticatedUser;
use crate::domain::category::Category;
use crate::forms::categories::{AddCategoryForm, EditCategoryForm};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Loads all categories for the back-office table.
pub fn load_categories_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader + ?Sized,
{
    ensure_admin(user)?;
    repo.list_categories().map_err(ServiceError::from)
}

pub fn create_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    ensure_admin(user)?;

    let new_category = form
        .into_new_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_category(&new_category)
        .map_err(ServiceError::from)
}

pub fn update_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
    form: EditCategoryForm,
) -> ServiceResult<Category>
where
    R: CategoryWriter + ?Sized,
{
    ensure_admin(user)?;

    let updates = form
        .into_update_category()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.update_category(category_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a category. Products keep existing with their category unset.
pub fn delete_category<R>(
    repo: &R,
    user: &AuthenticatedUser,
    category_id: i32,
) -> ServiceResult<()>
where
    R: CategoryWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.delete_category(category_id).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::category::{NewCategory, UpdateCategory};
    use crate::repository::mock::{MockCategoryReader, MockCategoryWriter};
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

    fn sample_category(id: i32, name: &str) -> Category {
        Category {
            id,
            name: name.to_string(),
            description: None,
            image_url: None,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    struct FakeRepo {
        category_reader: MockCategoryReader,
        category_writer: MockCategoryWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                category_reader: MockCategoryReader::new(),
                category_writer: MockCategoryWriter::new(),
            }
        }
    }

    impl CategoryReader for FakeRepo {
        fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>> {
            self.category_reader.get_category_by_id(id)
        }

        fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
            self.category_reader.list_categories()
        }
    }

    impl CategoryWriter for FakeRepo {
        fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category> {
            self.category_writer.create_category(new_category)
        }

        fn update_category(
            &self,
            category_id: i32,
            updates: &UpdateCategory,
        ) -> RepositoryResult<Category> {
            self.category_writer.update_category(category_id, updates)
        }

        fn delete_category(&self, category_id: i32) -> RepositoryResult<()> {
            self.category_writer.delete_category(category_id)
        }
    }

    #[test]
    fn listing_requires_the_admin_role() {
        let repo = FakeRepo::new();

        let result = load_categories_page(&repo, &customer());

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn create_category_sanitizes_the_name() {
        let mut repo = FakeRepo::new();
        repo.category_writer
            .expect_create_category()
            .times(1)
            .withf(|new_category| {
                assert_eq!(new_category.name, "Eau de Parfum");
                true
            })
            .returning(|_| Ok(sample_category(1, "Eau de Parfum")));

        let form = AddCategoryForm {
            name: "  Eau  de  Parfum ".to_string(),
            description: None,
            image_url: None,
        };

        let created = create_category(&repo, &admin(), form).expect("expected success");
        assert_eq!(created.id, 1);
    }

    #[test]
    fn delete_category_requires_the_admin_role() {
        let repo = FakeRepo::new();

        let result = delete_category(&repo, &customer(), 1);

        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }
}
