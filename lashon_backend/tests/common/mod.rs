use lashon_backend::*;

/// A migrated connection to `LASHON_TEST_DATABASE_URL`, or `None` when the
/// variable isn't set and the database tests should be skipped.
pub fn test_conn() -> Option<PgConnection> {
    dotenv::dotenv().ok();
    let url = match std::env::var("LASHON_TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("LASHON_TEST_DATABASE_URL not set, skipping.");
            return None;
        }
    };
    let conn = db_connect(&url).expect("Can't connect to the test database!");
    check_db(&conn, true).expect("Can't migrate the test database!");
    Some(conn)
}

#[allow(dead_code)]
pub fn is_not_found<T>(result: Result<T>) -> bool {
    match result {
        Err(e) => match *e.kind() {
            ErrorKind::NotFound(_) => true,
            _ => false,
        },
        Ok(_) => false,
    }
}

#[allow(dead_code)]
pub fn is_invalid<T>(result: Result<T>) -> bool {
    match result {
        Err(e) => match *e.kind() {
            ErrorKind::InvalidInput(_) => true,
            _ => false,
        },
        Ok(_) => false,
    }
}
