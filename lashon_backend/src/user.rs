use super::*;

pub fn get_user_by_name(conn: &PgConnection, user_name: &str) -> Result<User> {
    use crate::schema::users;
    use diesel::result::Error::NotFound;

    users::table
        .filter(users::name.eq(user_name))
        .first(conn)
        .map_err(|e| match e {
            NotFound => Error::from_kind(ErrorKind::NoSuchUser(user_name.into())),
            e => Error::with_chain(e, "Error when trying to retrieve user!"),
        })
}

pub fn list_users(conn: &PgConnection) -> Result<Vec<User>> {
    use crate::schema::users;

    users::table
        .order(users::id)
        .load(conn)
        .chain_err(|| "Can't load users")
}

pub fn add_user(conn: &PgConnection, name: &str, email: Option<&str>) -> Result<User> {
    use crate::schema::users;

    let name = name.trim();
    if name.is_empty() || name.chars().count() > 100 {
        return invalid("user name must be between 1 and 100 characters");
    }
    if let Some(email) = email {
        if email.len() > 254 || !email.contains('@') {
            return invalid("e-mail address is not valid");
        }
    }

    let user: User = diesel::insert_into(users::table)
        .values(&NewUser { name, email })
        .get_result(conn)
        .chain_err(|| "Couldn't create a new user!")?;

    info!("Created a new user {:?} with id {}.", name, user.id);
    Ok(user)
}

pub fn remove_user(conn: &PgConnection, user_name: &str) -> Result<User> {
    use crate::schema::users;
    use diesel::result::Error::NotFound;

    diesel::delete(users::table.filter(users::name.eq(user_name)))
        .get_result(conn)
        .map_err(|e| match e {
            NotFound => Error::from_kind(ErrorKind::NoSuchUser(user_name.into())),
            e => Error::with_chain(e, "Couldn't remove the user!"),
        })
}

pub fn touch(conn: &PgConnection, user_id: i32) -> Result<()> {
    use crate::schema::users;

    diesel::update(users::table.find(user_id))
        .set(users::last_seen.eq(chrono::Utc::now()))
        .execute(conn)?;
    Ok(())
}

pub fn get_group(conn: &PgConnection, group_name: &str) -> Result<Option<UserGroup>> {
    use crate::schema::user_groups;

    let group = user_groups::table
        .filter(user_groups::group_name.eq(group_name))
        .get_result(conn)
        .optional()?;

    Ok(group)
}

pub fn get_or_create_group(conn: &PgConnection, group_name: &str) -> Result<UserGroup> {
    use crate::schema::user_groups;

    diesel::insert_into(user_groups::table)
        .values(&NewUserGroup { group_name })
        .on_conflict_do_nothing()
        .execute(conn)?;

    let group = try_or!(get_group(conn, group_name)?,
        else bail!(ErrorKind::DatabaseOdd("The group was inserted but can't be found.")));
    Ok(group)
}

pub fn join_group(conn: &PgConnection, user_id: i32, group_name: &str) -> Result<bool> {
    use crate::schema::group_memberships;

    let group = get_or_create_group(conn, group_name)?;
    let inserted = diesel::insert_into(group_memberships::table)
        .values(&GroupMembership { user_id, group_id: group.id })
        .on_conflict_do_nothing()
        .execute(conn)?;

    Ok(inserted > 0)
}

pub fn leave_group(conn: &PgConnection, user_id: i32, group_name: &str) -> Result<bool> {
    use crate::schema::group_memberships;

    let group = try_or!(get_group(conn, group_name)?, else return Ok(false));
    let removed = diesel::delete(group_memberships::table
            .filter(group_memberships::user_id.eq(user_id))
            .filter(group_memberships::group_id.eq(group.id)))
        .execute(conn)?;

    Ok(removed > 0)
}

pub fn group_members(conn: &PgConnection, group_name: &str) -> Result<Vec<User>> {
    use crate::schema::{users, user_groups, group_memberships};

    let members = users::table
        .inner_join(group_memberships::table.inner_join(user_groups::table))
        .filter(user_groups::group_name.eq(group_name))
        .select(users::all_columns)
        .order(users::id)
        .load(conn)?;

    Ok(members)
}

/// An empty group name admits every user.
pub fn check_user_group(conn: &PgConnection, user_id: i32, group_name: &str) -> Result<bool> {
    use crate::schema::{user_groups, group_memberships};

    if group_name.is_empty() { return Ok(true) };

    let exists: Option<(i32, i32)> = group_memberships::table
        .inner_join(user_groups::table)
        .filter(group_memberships::user_id.eq(user_id))
        .filter(user_groups::group_name.eq(group_name))
        .select((group_memberships::user_id, group_memberships::group_id))
        .get_result(conn)
        .optional()
        .chain_err(|| "DB error")?;

    Ok(exists.is_some())
}
