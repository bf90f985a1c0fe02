mod common;

use diesel::prelude::*;

use parfumerie::schema::products;

#[test]
fn test_migrated_store_db_starts_empty_and_is_cleaned_up() {
    let base = "test_parfumerie_store.db";

    {
        let test_db = common::TestDb::new(base);
        let mut conn = test_db.pool().get().expect("pooled connection");

        // Migrations must have created the catalog tables.
        let count: i64 = products::table
            .count()
            .get_result(&mut conn)
            .expect("products table present");
        assert_eq!(count, 0);
    }

    let db_path = std::path::Path::new(base);
    assert!(!db_path.exists());
    assert!(!std::path::Path::new(&format!("{base}-shm")).exists());
    assert!(!std::path::Path::new(&format!("{base}-wal")).exists());
}
