error_chain! {
    foreign_links {
        ParseBool(::std::str::ParseBoolError);
        Var(::std::env::VarError);
        ParseInt(::std::num::ParseIntError);
        StdIo(::std::io::Error);
        Diesel(::diesel::result::Error);
        DieselConnection(::diesel::ConnectionError);
        DieselMigration(::diesel_migrations::RunMigrationsError);
        Pool(::diesel::r2d2::PoolError);
        Json(::serde_json::Error);
    }
    errors {
        InvalidInput(reason: String) {
            description("Provided input is invalid.")
            display("{}", reason)
        }
        NotFound(what: &'static str) {
            description("Requested resource doesn't exist")
            display("{} not found.", what)
        }
        NoSuchUser(user: String) {
            description("No such user exists")
            display("No user {} exists.", user)
        }
        NoSuchSess {
            description("Session doesn't exist!")
            display("Session doesn't exist!")
        }
        AccessDenied {
            description("Access denied")
            display("Access denied")
        }
        DatabaseOdd(reason: &'static str) {
            description("There's something wrong with the contents of the DB vs. how it should be!")
            display("There's something wrong with the contents of the DB vs. how it should be! {}", reason)
        }
    }
}

/// Shorthand for rejecting a request with a field-specific message.
pub fn invalid<T>(reason: impl Into<String>) -> Result<T> {
    Err(ErrorKind::InvalidInput(reason.into()).into())
}
