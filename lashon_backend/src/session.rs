use super::*;
use rand::RngCore;
use data_encoding::BASE64URL_NOPAD;

pub const SESSID_BITS: usize = 128;

#[derive(Debug, Clone, PartialEq)]
pub struct UserSession {
    pub sess_id: i32,
    pub user_id: i32,
}

pub fn fresh_token() -> Result<String> {
    let mut session_id = [0_u8; SESSID_BITS / 8];
    rand::rngs::OsRng
        .try_fill_bytes(&mut session_id)
        .chain_err(|| "Unable to connect to the system random number generator!")?;
    Ok(BASE64URL_NOPAD.encode(&session_id))
}

pub fn is_well_formed(token: &str) -> bool {
    match BASE64URL_NOPAD.decode(token.as_bytes()) {
        Ok(bytes) => bytes.len() == SESSID_BITS / 8,
        Err(_) => false,
    }
}

/// Sessions are normally created by the login front; this is here for
/// operators and development setups.
pub fn start(conn: &PgConnection, user_id: i32) -> Result<(Session, String)> {
    use crate::schema::sessions;

    let token = fresh_token()?;
    let sess: Session = diesel::insert_into(sessions::table)
        .values(&NewSession { user_id, token: &token })
        .get_result(conn)
        .chain_err(|| "Couldn't start a session!")?;

    debug!("Started session {} for user {}.", sess.id, user_id);
    Ok((sess, token))
}

/// Looks the token up and refreshes its `last_seen`.
pub fn check(conn: &PgConnection, token: &str) -> Result<Option<UserSession>> {
    use crate::schema::sessions;

    if !is_well_formed(token) {
        return Ok(None);
    }

    let sess: Option<Session> = time_it!("session check",
        diesel::update(sessions::table.filter(sessions::token.eq(token)))
            .set(sessions::last_seen.eq(chrono::Utc::now()))
            .get_result(conn)
            .optional()
    )?;

    let sess = match sess {
        Some(s) => s,
        None => return Ok(None),
    };
    user::touch(conn, sess.user_id)?;

    Ok(Some(UserSession { sess_id: sess.id, user_id: sess.user_id }))
}

pub fn end(conn: &PgConnection, token: &str) -> Result<()> {
    use crate::schema::sessions;

    let deleted = diesel::delete(sessions::table.filter(sessions::token.eq(token)))
        .execute(conn)?;
    if deleted == 0 {
        bail!(ErrorKind::NoSuchSess);
    }
    Ok(())
}

pub fn clean_old_sessions(conn: &PgConnection, how_old: chrono::Duration) -> Result<usize> {
    use crate::schema::sessions;

    let deleted_count = diesel::delete(sessions::table
        .filter(sessions::last_seen.lt(chrono::Utc::now() - how_old)))
        .execute(conn)?;

    Ok(deleted_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tokens_are_well_formed_and_distinct() {
        let a = fresh_token().unwrap();
        let b = fresh_token().unwrap();
        assert!(is_well_formed(&a));
        assert!(is_well_formed(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn rejects_garbage_tokens() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("not a token!"));
        assert!(!is_well_formed("AAAA"));
    }
}
