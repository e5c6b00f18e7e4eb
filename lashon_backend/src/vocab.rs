use super::*;
use crate::schema::{vocab_sets, vocab_words, user_progress, card_reviews};
use crate::achievements::Unlocked;
use crate::stats::{StatsSummary, XpGain};
use chrono::{DateTime, NaiveDate, Utc};
use diesel::result::{DatabaseErrorKind, Error::DatabaseError};
use diesel::sql_types::{Integer, Timestamptz};
use rand::seq::SliceRandom;
use serde::{Serialize, Deserialize};
use std::collections::HashSet;

pub const MAX_SET_NAME_CHARS: usize = 100;
pub const MAX_QUERY_CHARS: usize = 100;
pub const MAX_REVIEW_KEY_CHARS: usize = 64;
pub const MAX_BULK_UPDATES: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WordInput {
    pub hebrew: String,
    #[serde(default)]
    pub transliteration: String,
    pub gloss: String,
    pub part_of_speech: Option<String>,
    pub gender: Option<String>,
    pub strongs: Option<String>,
    pub frequency: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub words: Vec<WordInput>,
}

fn check_set_name(name: &str) -> Result<()> {
    let chars = name.trim().chars().count();
    if chars == 0 || chars > MAX_SET_NAME_CHARS {
        return invalid(format!("name must be between 1 and {} characters", MAX_SET_NAME_CHARS));
    }
    Ok(())
}

pub fn validate_set(input: &SetInput) -> Result<()> {
    check_set_name(&input.name)?;
    for (i, w) in input.words.iter().enumerate() {
        if w.hebrew.trim().is_empty() {
            return invalid(format!("words[{}].hebrew can't be empty", i));
        }
        if !hebrew::contains_hebrew(&w.hebrew) {
            return invalid(format!("words[{}].hebrew must contain Hebrew letters", i));
        }
        if w.gloss.trim().is_empty() {
            return invalid(format!("words[{}].gloss can't be empty", i));
        }
        if let Some(ref strongs) = w.strongs {
            hebrew::normalize_strongs(strongs)
                .map_err(|_| Error::from_kind(ErrorKind::InvalidInput(
                    format!("words[{}].strongs is not a Strong's Hebrew number", i))))?;
        }
        if w.frequency.map_or(false, |f| f < 0) {
            return invalid(format!("words[{}].frequency can't be negative", i));
        }
    }
    Ok(())
}

fn is_unique_violation(e: &diesel::result::Error) -> bool {
    match *e {
        DatabaseError(DatabaseErrorKind::UniqueViolation, _) => true,
        _ => false,
    }
}

fn name_taken(conn: &PgConnection, name: &str, except_id: Option<i32>) -> Result<bool> {
    let ids: Vec<i32> = vocab_sets::table
        .filter(vocab_sets::name.eq(name))
        .select(vocab_sets::id)
        .load(conn)?;
    Ok(ids.into_iter().any(|id| Some(id) != except_id))
}

#[derive(Debug, Clone, Serialize)]
pub struct SetDetail {
    #[serde(flatten)]
    pub set: VocabSet,
    pub word_count: i64,
    pub words: Vec<VocabWord>,
}

impl SetDetail {
    /// The set in the same shape `create_set` accepts.
    pub fn to_input(&self) -> SetInput {
        SetInput {
            name: self.set.name.clone(),
            description: self.set.description.clone(),
            position: self.set.position,
            words: self.words.iter().map(|w| WordInput {
                hebrew: w.hebrew.clone(),
                transliteration: w.transliteration.clone(),
                gloss: w.gloss.clone(),
                part_of_speech: w.part_of_speech.clone(),
                gender: w.gender.clone(),
                strongs: w.strongs.clone(),
                frequency: w.frequency,
            }).collect(),
        }
    }
}

pub fn create_set(conn: &PgConnection, input: &SetInput) -> Result<SetDetail> {
    validate_set(input)?;
    let name = input.name.trim();

    let set_id = conn.transaction::<_, Error, _>(|| {
        if name_taken(conn, name, None)? {
            return invalid(format!("a vocabulary set named {:?} already exists", name));
        }

        let set: VocabSet = diesel::insert_into(vocab_sets::table)
            .values(&NewVocabSet {
                name,
                description: input.description.trim(),
                position: input.position,
            })
            .get_result(conn)
            .map_err(|e| if is_unique_violation(&e) {
                Error::from_kind(ErrorKind::InvalidInput(
                    format!("a vocabulary set named {:?} already exists", name)))
            } else {
                Error::with_chain(e, "Couldn't insert the vocabulary set.")
            })?;

        let keys: Vec<String> = input.words.iter().map(|w| hebrew::search_key(&w.hebrew)).collect();
        let strongs: Vec<Option<String>> = input.words.iter()
            .map(|w| w.strongs.as_ref().map(|s| hebrew::normalize_strongs(s)).transpose())
            .collect::<Result<_>>()?;

        let new_words: Vec<NewVocabWord> = input.words.iter().enumerate()
            .map(|(i, w)| NewVocabWord {
                set_id: set.id,
                position: i as i32,
                hebrew: w.hebrew.trim(),
                search_key: &keys[i],
                transliteration: w.transliteration.trim(),
                gloss: w.gloss.trim(),
                part_of_speech: w.part_of_speech.as_ref().map(String::as_str),
                gender: w.gender.as_ref().map(String::as_str),
                strongs: strongs[i].as_ref().map(String::as_str),
                frequency: w.frequency,
            })
            .collect();

        if !new_words.is_empty() {
            diesel::insert_into(vocab_words::table)
                .values(&new_words)
                .execute(conn)
                .chain_err(|| "Couldn't insert the words of the set.")?;
        }

        info!("Created vocabulary set {:?} with {} words.", name, new_words.len());
        Ok(set.id)
    })?;

    get_set(conn, set_id)
}

pub fn update_set(conn: &PgConnection, set_id: i32, changes: &UpdateVocabSet) -> Result<VocabSet> {
    let mut changes = changes.clone();
    if let Some(ref mut name) = changes.name {
        check_set_name(name)?;
        *name = name.trim().to_string();
        if name_taken(conn, name, Some(set_id))? {
            return invalid(format!("a vocabulary set named {:?} already exists", name));
        }
    }

    let current: VocabSet = try_or!(vocab_sets::table.find(set_id).get_result(conn).optional()?,
        else bail!(ErrorKind::NotFound("Vocabulary set")));

    if changes.name.is_none() && changes.description.is_none() && changes.position.is_none() {
        return Ok(current);
    }

    let updated = diesel::update(&current)
        .set(&changes)
        .get_result(conn)
        .map_err(|e| if is_unique_violation(&e) {
            Error::from_kind(ErrorKind::InvalidInput("a vocabulary set with that name already exists".into()))
        } else {
            Error::with_chain(e, "Couldn't update the vocabulary set.")
        })?;
    Ok(updated)
}

/// Removes the set; its words and everybody's progress on them cascade.
pub fn delete_set(conn: &PgConnection, set_id: i32) -> Result<()> {
    let deleted = diesel::delete(vocab_sets::table.find(set_id)).execute(conn)?;
    if deleted == 0 {
        bail!(ErrorKind::NotFound("Vocabulary set"));
    }
    info!("Deleted vocabulary set {}.", set_id);
    Ok(())
}

pub fn list_sets(conn: &PgConnection) -> Result<Vec<VocabSetSummary>> {
    let sets = diesel::sql_query(
        "SELECT s.id, s.name, s.description, s.position, COUNT(w.id) AS word_count \
         FROM vocab_sets s LEFT JOIN vocab_words w ON w.set_id = s.id \
         GROUP BY s.id \
         ORDER BY s.position, s.id")
        .load(conn)?;
    Ok(sets)
}

pub fn get_set(conn: &PgConnection, set_id: i32) -> Result<SetDetail> {
    let set: VocabSet = try_or!(vocab_sets::table.find(set_id).get_result(conn).optional()?,
        else bail!(ErrorKind::NotFound("Vocabulary set")));

    let words: Vec<VocabWord> = VocabWord::belonging_to(&set)
        .order((vocab_words::position, vocab_words::id))
        .load(conn)?;

    Ok(SetDetail { word_count: words.len() as i64, set, words })
}

fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if c == '%' || c == '_' || c == '\\' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Hebrew queries match the pointless spelling; anything else matches
/// the transliteration or the gloss.
pub fn search(conn: &PgConnection, query: &str, limit: i64) -> Result<Vec<VocabWord>> {
    let query = query.trim();
    let chars = query.chars().count();
    if chars == 0 || chars > MAX_QUERY_CHARS {
        return invalid(format!("q must be between 1 and {} characters", MAX_QUERY_CHARS));
    }

    let words = if hebrew::contains_hebrew(query) {
        vocab_words::table
            .filter(vocab_words::search_key.like(like_pattern(&hebrew::search_key(query))))
            .order((vocab_words::search_key, vocab_words::id))
            .limit(limit)
            .load(conn)?
    } else {
        let pattern = like_pattern(query);
        vocab_words::table
            .filter(vocab_words::transliteration.ilike(pattern.clone())
                .or(vocab_words::gloss.ilike(pattern)))
            .order((vocab_words::gloss, vocab_words::id))
            .limit(limit)
            .load(conn)?
    };
    Ok(words)
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewCard {
    pub word: VocabWord,
    pub level: i32,
    pub is_new: bool,
    pub next_review: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewQueue {
    pub due_count: usize,
    pub new_count: usize,
    pub cards: Vec<ReviewCard>,
}

/// Due cards first, topped up with words the user hasn't seen yet.
pub fn review_queue(conn: &PgConnection,
                    user_id: i32,
                    set_id: Option<i32>,
                    limit: i64,
                    now: DateTime<Utc>)
                    -> Result<ReviewQueue> {
    if let Some(set_id) = set_id {
        let exists: Option<i32> = vocab_sets::table.find(set_id)
            .select(vocab_sets::id)
            .get_result(conn)
            .optional()?;
        if exists.is_none() {
            bail!(ErrorKind::NotFound("Vocabulary set"));
        }
    }

    let mut due_query = user_progress::table
        .inner_join(vocab_words::table)
        .filter(user_progress::user_id.eq(user_id))
        .filter(user_progress::next_review.le(now))
        .order(user_progress::next_review.asc())
        .limit(limit)
        .into_boxed();
    if let Some(set_id) = set_id {
        due_query = due_query.filter(vocab_words::set_id.eq(set_id));
    }
    let due: Vec<(UserProgress, VocabWord)> = time_it!("review_queue due", due_query.load(conn))?;

    let remaining = limit - due.len() as i64;
    let fresh: Vec<VocabWord> = if remaining > 0 {
        let seen = user_progress::table
            .filter(user_progress::user_id.eq(user_id))
            .select(user_progress::word_id);
        let mut new_query = vocab_words::table
            .filter(vocab_words::id.ne_all(seen))
            .order((vocab_words::set_id, vocab_words::position, vocab_words::id))
            .limit(remaining)
            .into_boxed();
        if let Some(set_id) = set_id {
            new_query = new_query.filter(vocab_words::set_id.eq(set_id));
        }
        time_it!("review_queue new", new_query.load(conn))?
    } else {
        vec![]
    };

    let due_count = due.len();
    let new_count = fresh.len();
    let mut cards: Vec<ReviewCard> = due.into_iter()
        .map(|(p, word)| ReviewCard { word, level: p.level, is_new: false, next_review: Some(p.next_review) })
        .chain(fresh.into_iter()
            .map(|word| ReviewCard { word, level: 0, is_new: true, next_review: None }))
        .collect();
    cards.shuffle(&mut rand::thread_rng());

    Ok(ReviewQueue { due_count, new_count, cards })
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardResult {
    pub word_id: i32,
    pub correct: bool,
    /// Client-generated key; a repeated key is acknowledged without counting again.
    pub review_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardOutcome {
    pub duplicate: bool,
    pub progress: Option<UserProgress>,
    pub xp: Option<XpGain>,
    pub stats: StatsSummary,
    pub achievements: Vec<Unlocked>,
}

pub fn record_card_result(conn: &PgConnection,
                          user_id: i32,
                          result: &CardResult,
                          today: NaiveDate,
                          now: DateTime<Utc>)
                          -> Result<CardOutcome> {
    let review_key = result.review_id.as_ref().map(|k| k.trim());
    if let Some(key) = review_key {
        if key.is_empty() || key.chars().count() > MAX_REVIEW_KEY_CHARS {
            return invalid(format!("review_id must be between 1 and {} characters", MAX_REVIEW_KEY_CHARS));
        }
    }

    conn.transaction(|| {
        let word: Option<i32> = vocab_words::table.find(result.word_id)
            .select(vocab_words::id)
            .get_result(conn)
            .optional()?;
        if word.is_none() {
            bail!(ErrorKind::NotFound("Word"));
        }

        let inserted = diesel::insert_into(card_reviews::table)
            .values(&NewCardReview {
                user_id,
                word_id: result.word_id,
                review_key,
                correct: result.correct,
            })
            .on_conflict_do_nothing()
            .execute(conn)?;

        if inserted == 0 {
            let counted: CardReview = card_reviews::table
                .filter(card_reviews::user_id.eq(user_id))
                .filter(card_reviews::review_key.eq(review_key))
                .get_result(conn)?;
            if counted.word_id != result.word_id {
                return invalid(format!("review_id {:?} was already used for another word",
                                       counted.review_key.unwrap_or_default()));
            }
            debug!("Card review {:?} of user {} was already counted.", review_key, user_id);
            let progress = user_progress::table
                .find((user_id, result.word_id))
                .get_result(conn)
                .optional()?;
            let stats = stats::get_or_create(conn, user_id)?;
            return Ok(CardOutcome {
                duplicate: true,
                progress,
                xp: None,
                stats: stats::summary(&stats, today),
                achievements: vec![],
            });
        }

        let previous: Option<UserProgress> = user_progress::table
            .find((user_id, result.word_id))
            .for_update()
            .get_result(conn)
            .optional()?;

        let (level, next_review) = srs::schedule(previous.map_or(0, |p| p.level), result.correct, now);
        let correct_inc = if result.correct { 1 } else { 0 };

        let progress: UserProgress = diesel::insert_into(user_progress::table)
            .values(&UserProgress {
                user_id,
                word_id: result.word_id,
                level,
                next_review,
                last_review: Some(now),
                review_count: 1,
                correct_count: correct_inc,
            })
            .on_conflict((user_progress::user_id, user_progress::word_id))
            .do_update()
            .set((user_progress::level.eq(level),
                  user_progress::next_review.eq(next_review),
                  user_progress::last_review.eq(Some(now)),
                  user_progress::review_count.eq(user_progress::review_count + 1),
                  user_progress::correct_count.eq(user_progress::correct_count + correct_inc)))
            .get_result(conn)?;

        stats::record_review(conn, user_id, result.correct)?;
        let xp = stats::add_xp(conn, user_id, gamification::card_xp(result.correct))?;
        let stats = stats::record_study(conn, user_id, 1, today)?;
        let unlocked = achievements::check(conn, user_id)?;
        let stats = if unlocked.is_empty() { stats } else { stats::get_or_create(conn, user_id)? };

        Ok(CardOutcome {
            duplicate: false,
            progress: Some(progress),
            xp: Some(xp),
            stats: stats::summary(&stats, today),
            achievements: unlocked,
        })
    })
}

#[derive(QueryableByName, Debug, Clone, Serialize, PartialEq)]
pub struct SetProgress {
    #[sql_type = "diesel::sql_types::Int4"]
    pub set_id: i32,
    #[sql_type = "diesel::sql_types::Varchar"]
    pub name: String,
    #[sql_type = "diesel::sql_types::BigInt"]
    pub total_words: i64,
    #[sql_type = "diesel::sql_types::BigInt"]
    pub seen: i64,
    #[sql_type = "diesel::sql_types::BigInt"]
    pub learned: i64,
    #[sql_type = "diesel::sql_types::BigInt"]
    pub mastered: i64,
    #[sql_type = "diesel::sql_types::BigInt"]
    pub due: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ProgressOverview {
    pub total_words: i64,
    pub seen: i64,
    pub learned: i64,
    pub mastered: i64,
    pub due: i64,
    pub sets: Vec<SetProgress>,
}

impl ProgressOverview {
    pub fn from_sets(sets: Vec<SetProgress>) -> ProgressOverview {
        ProgressOverview {
            total_words: sets.iter().map(|s| s.total_words).sum(),
            seen: sets.iter().map(|s| s.seen).sum(),
            learned: sets.iter().map(|s| s.learned).sum(),
            mastered: sets.iter().map(|s| s.mastered).sum(),
            due: sets.iter().map(|s| s.due).sum(),
            sets,
        }
    }
}

pub fn progress_overview(conn: &PgConnection, user_id: i32, now: DateTime<Utc>) -> Result<ProgressOverview> {
    let sets: Vec<SetProgress> = diesel::sql_query(
        "SELECT s.id AS set_id, s.name, COUNT(w.id) AS total_words, \
                COUNT(p.word_id) AS seen, \
                COUNT(p.word_id) FILTER (WHERE p.level >= $2) AS learned, \
                COUNT(p.word_id) FILTER (WHERE p.level >= $3) AS mastered, \
                COUNT(p.word_id) FILTER (WHERE p.next_review <= $4) AS due \
         FROM vocab_sets s \
         LEFT JOIN vocab_words w ON w.set_id = s.id \
         LEFT JOIN user_progress p ON p.word_id = w.id AND p.user_id = $1 \
         GROUP BY s.id \
         ORDER BY s.position, s.id")
        .bind::<Integer, _>(user_id)
        .bind::<Integer, _>(srs::LEARNED_LEVEL)
        .bind::<Integer, _>(srs::MASTERED_LEVEL)
        .bind::<Timestamptz, _>(now)
        .load(conn)?;

    Ok(ProgressOverview::from_sets(sets))
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProgressEdit {
    pub word_id: i32,
    pub level: i32,
}

pub fn validate_edits(edits: &[ProgressEdit]) -> Result<()> {
    if edits.is_empty() {
        return invalid("updates can't be empty");
    }
    if edits.len() > MAX_BULK_UPDATES {
        return invalid(format!("at most {} updates at a time", MAX_BULK_UPDATES));
    }
    let mut seen = HashSet::new();
    for e in edits {
        if !seen.insert(e.word_id) {
            return invalid(format!("word {} appears twice in updates", e.word_id));
        }
    }
    Ok(())
}

/// Sets the caller's level on each listed word and reschedules it.
/// Review counters are left alone.
pub fn bulk_update_progress(conn: &PgConnection,
                            user_id: i32,
                            edits: &[ProgressEdit],
                            now: DateTime<Utc>)
                            -> Result<usize> {
    validate_edits(edits)?;
    let ids: Vec<i32> = edits.iter().map(|e| e.word_id).collect();

    conn.transaction(|| {
        let found: i64 = vocab_words::table
            .filter(vocab_words::id.eq_any(&ids))
            .count()
            .get_result(conn)?;
        if found != ids.len() as i64 {
            bail!(ErrorKind::NotFound("Word"));
        }

        for edit in edits {
            let (level, next_review) = srs::reschedule_at(edit.level, now);
            diesel::insert_into(user_progress::table)
                .values(&UserProgress {
                    user_id,
                    word_id: edit.word_id,
                    level,
                    next_review,
                    last_review: None,
                    review_count: 0,
                    correct_count: 0,
                })
                .on_conflict((user_progress::user_id, user_progress::word_id))
                .do_update()
                .set((user_progress::level.eq(level),
                      user_progress::next_review.eq(next_review)))
                .execute(conn)?;
        }
        debug!("User {} set the progress of {} words.", user_id, edits.len());
        Ok(edits.len())
    })
}

/// Forgets the caller's progress, in one set or everywhere.
pub fn reset_progress(conn: &PgConnection, user_id: i32, set_id: Option<i32>) -> Result<usize> {
    let deleted = match set_id {
        Some(set_id) => {
            let words = vocab_words::table
                .filter(vocab_words::set_id.eq(set_id))
                .select(vocab_words::id);
            diesel::delete(user_progress::table
                    .filter(user_progress::user_id.eq(user_id))
                    .filter(user_progress::word_id.eq_any(words)))
                .execute(conn)?
        }
        None => {
            diesel::delete(user_progress::table.filter(user_progress::user_id.eq(user_id)))
                .execute(conn)?
        }
    };
    info!("Reset progress of user {} on {} words.", user_id, deleted);
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(hebrew: &str, gloss: &str) -> WordInput {
        WordInput {
            hebrew: hebrew.into(),
            transliteration: String::new(),
            gloss: gloss.into(),
            part_of_speech: None,
            gender: None,
            strongs: None,
            frequency: None,
        }
    }

    fn set(name: &str, words: Vec<WordInput>) -> SetInput {
        SetInput { name: name.into(), description: String::new(), position: 0, words }
    }

    #[test]
    fn set_validation() {
        assert!(validate_set(&set("Genesis 1", vec![word("אֱלֹהִים", "God")])).is_ok());
        assert!(validate_set(&set("  ", vec![])).is_err());
        assert!(validate_set(&set(&"x".repeat(101), vec![])).is_err());
        assert!(validate_set(&set("ok", vec![word("", "God")])).is_err());
        assert!(validate_set(&set("ok", vec![word("elohim", "God")])).is_err());
        assert!(validate_set(&set("ok", vec![word("אֱלֹהִים", " ")])).is_err());

        let mut w = word("אֱלֹהִים", "God");
        w.strongs = Some("G2316".into());
        let err = validate_set(&set("ok", vec![w])).unwrap_err();
        assert_eq!(err.to_string(), "words[0].strongs is not a Strong's Hebrew number");
    }

    #[test]
    fn set_input_defaults() {
        let input: SetInput = serde_json::from_str(r#"{"name": "Verbs", "words": [{"hebrew": "הָלַךְ", "gloss": "walk"}]}"#).unwrap();
        assert_eq!(input.description, "");
        assert_eq!(input.position, 0);
        assert_eq!(input.words[0].transliteration, "");
    }

    #[test]
    fn like_patterns_are_escaped() {
        assert_eq!(like_pattern("king"), "%king%");
        assert_eq!(like_pattern("100%_\\"), "%100\\%\\_\\\\%");
    }

    #[test]
    fn bulk_edit_validation() {
        assert!(validate_edits(&[]).is_err());
        let dup = vec![ProgressEdit { word_id: 1, level: 2 }, ProgressEdit { word_id: 1, level: 3 }];
        assert!(validate_edits(&dup).is_err());
        let many: Vec<ProgressEdit> = (0..501).map(|i| ProgressEdit { word_id: i, level: 1 }).collect();
        assert!(validate_edits(&many).is_err());
        assert!(validate_edits(&many[..500]).is_ok());
    }

    #[test]
    fn overview_totals() {
        let sp = |id, total, learned| SetProgress {
            set_id: id,
            name: format!("set {}", id),
            total_words: total,
            seen: learned + 1,
            learned,
            mastered: 0,
            due: 1,
        };
        let o = ProgressOverview::from_sets(vec![sp(1, 10, 4), sp(2, 5, 0)]);
        assert_eq!(o.total_words, 15);
        assert_eq!(o.learned, 4);
        assert_eq!(o.seen, 6);
        assert_eq!(o.due, 2);
        assert_eq!(o.sets.len(), 2);
    }

    #[test]
    fn exported_set_is_importable() {
        use chrono::TimeZone;
        let detail = SetDetail {
            set: VocabSet {
                id: 7,
                name: "Genesis 1".into(),
                description: "Creation".into(),
                position: 2,
                created_at: Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap(),
            },
            word_count: 1,
            words: vec![VocabWord {
                id: 70,
                set_id: 7,
                position: 0,
                hebrew: "בָּרָא".into(),
                search_key: "ברא".into(),
                transliteration: "bara".into(),
                gloss: "he created".into(),
                part_of_speech: Some("verb".into()),
                gender: None,
                strongs: Some("H1254".into()),
                frequency: Some(54),
            }],
        };
        let input = detail.to_input();
        assert!(validate_set(&input).is_ok());
        assert_eq!(input.name, "Genesis 1");
        assert_eq!(input.position, 2);
        assert_eq!(input.words[0].strongs.as_deref(), Some("H1254"));
    }
}
