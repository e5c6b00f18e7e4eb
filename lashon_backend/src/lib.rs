#![recursion_limit = "256"]

#[macro_use] pub extern crate diesel;
#[macro_use] extern crate diesel_migrations;
#[macro_use] extern crate error_chain;
#[macro_use] pub extern crate log;
#[macro_use] extern crate lazy_static;

pub extern crate chrono;
pub extern crate serde_json;

pub use diesel::prelude::*;
pub use diesel::pg::PgConnection;
use diesel::r2d2::{self, ConnectionManager};
use chrono::{DateTime, NaiveDate, offset::Utc};

pub type ConnManager = ConnectionManager<PgConnection>;
pub type Pool = r2d2::Pool<ConnManager>;
pub type PooledConn = r2d2::PooledConnection<ConnManager>;

lazy_static! {
    pub static ref PERF_TRACE : bool = {
        dotenv::dotenv().ok();
        std::env::var("LASHON_PERF_TRACE").map(|s| s.parse::<bool>().unwrap_or(true))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! time_it {
    ($comment:expr , $code:expr) => { {
        if *$crate::PERF_TRACE {
            let start = ::std::time::Instant::now();
            let result = $code;
            $crate::log::debug!("{} took {:?}", $comment, start.elapsed());
            result
        } else {
            $code
        }
    } };
}

macro_rules! try_or {
    ($t:expr , else $e:expr ) => {  match $t { Some(x) => x, None => { $e } }  }
}

pub mod errors;
pub mod schema;
pub mod models;
pub mod gamification;
pub mod srs;
pub mod hebrew;
pub mod user;
pub mod session;
pub mod stats;
pub mod achievements;
pub mod vocab;
pub mod lessons;
pub mod study;
pub mod bible;

pub use errors::*;
pub use models::*;

embed_migrations!();

/// Runs the embedded migrations if asked to, and reports whether
/// somebody is in the `admins` group yet.
pub fn check_db(conn: &PgConnection, run_migrations: bool) -> Result<bool> {
    if run_migrations {
        embedded_migrations::run(conn).chain_err(|| "Couldn't run the migrations.")?;
        info!("Migrations checked.");
    }
    let admins = user::group_members(conn, "admins")
        .chain_err(|| "Couldn't query for the admin users.")?;

    Ok(!admins.is_empty())
}

pub fn db_connect(database_url: &str) -> Result<PgConnection> {
    PgConnection::establish(database_url)
        .chain_err(|| "Error connecting to database!")
}

pub fn create_pool(database_url: &str, max_size: u32) -> Result<Pool> {
    let manager = ConnManager::new(database_url);
    let pool = r2d2::Pool::builder()
        .max_size(max_size)
        .build(manager)
        .chain_err(|| "Failed to create the connection pool.")?;
    Ok(pool)
}

/// Calendar day in server-local time; streaks and daily goals count these.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Paging bounds shared by the list endpoints.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> Result<i64> {
    match limit {
        None => Ok(default),
        Some(l) if l >= 1 && l <= max => Ok(l),
        Some(_) => invalid(format!("limit must be between 1 and {}", max)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults_and_bounds() {
        assert_eq!(clamp_limit(None, 20, 100).unwrap(), 20);
        assert_eq!(clamp_limit(Some(1), 20, 100).unwrap(), 1);
        assert_eq!(clamp_limit(Some(100), 20, 100).unwrap(), 100);
        assert!(clamp_limit(Some(0), 20, 100).is_err());
        assert!(clamp_limit(Some(101), 20, 100).is_err());
    }

    #[test]
    fn invalid_input_message_is_field_specific() {
        let err = clamp_limit(Some(-5), 20, 50).unwrap_err();
        match err.kind() {
            ErrorKind::InvalidInput(msg) => assert_eq!(msg, "limit must be between 1 and 50"),
            other => panic!("unexpected error kind {:?}", other),
        }
    }
}
