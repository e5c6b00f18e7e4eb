//! Bible and Strong's lookups against a real PostgreSQL.
//! Skipped unless `LASHON_TEST_DATABASE_URL` is set.

mod common;

use common::{is_invalid, is_not_found, test_conn};
use lashon_backend::*;

fn seed(conn: &PgConnection) -> Result<()> {
    diesel::sql_query(
        "INSERT INTO bible_books (id, slug, name, hebrew_name, chapters) \
         VALUES (901, 'roundtrip-bereshit', 'Roundtrip Bereshit', 'בראשית', 2)")
        .execute(conn)?;
    diesel::sql_query(
        "INSERT INTO bible_verses (id, book_id, chapter, verse, hebrew, translation) VALUES \
         (90101, 901, 1, 1, 'בְּרֵאשִׁית בָּרָא אֱלֹהִים', 'In the beginning God created'), \
         (90102, 901, 1, 2, 'וְהָאָרֶץ הָיְתָה תֹהוּ', 'And the earth was formless')")
        .execute(conn)?;
    diesel::sql_query(
        "INSERT INTO bible_words (verse_id, position, hebrew, strongs, gloss) VALUES \
         (90101, 2, 'בָּרָא', 'H9001', 'created'), \
         (90101, 1, 'בְּרֵאשִׁית', NULL, 'in the beginning'), \
         (90101, 3, 'אֱלֹהִים', 'H9001', 'God')")
        .execute(conn)?;
    diesel::sql_query(
        "INSERT INTO strongs_hebrew (number, lemma, definition) \
         VALUES ('H9001', 'אֱלֹהִים', 'a test entry')")
        .execute(conn)?;
    Ok(())
}

#[test]
fn chapter_by_slug_name_or_number() {
    let conn = match test_conn() { Some(c) => c, None => return };

    conn.test_transaction::<_, Error, _>(|| {
        seed(&conn)?;

        let chapter = bible::chapter(&conn, "roundtrip-bereshit", 1)?;
        assert_eq!(chapter.book.id, 901);
        assert_eq!((chapter.previous, chapter.next), (None, Some(2)));
        assert_eq!(chapter.verses.len(), 2);
        let positions: Vec<i32> = chapter.verses[0].words.iter().map(|w| w.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
        assert!(chapter.verses[1].words.is_empty());

        assert_eq!(bible::chapter(&conn, "ROUNDTRIP BERESHIT", 2)?.verses.len(), 0);
        assert_eq!(bible::chapter(&conn, "901", 1)?.book.slug, "roundtrip-bereshit");
        Ok(())
    });
}

#[test]
fn unknown_books_and_chapters_are_not_found() {
    let conn = match test_conn() { Some(c) => c, None => return };

    conn.test_transaction::<_, Error, _>(|| {
        seed(&conn)?;

        assert!(is_not_found(bible::chapter(&conn, "no-such-book", 1)));
        assert!(is_not_found(bible::chapter(&conn, "roundtrip-bereshit", 0)));
        assert!(is_not_found(bible::chapter(&conn, "roundtrip-bereshit", 3)));
        assert!(is_not_found(bible::find_book(&conn, "%")));
        assert!(is_not_found(bible::find_book(&conn, "Roundtrip B_reshit")));
        assert!(is_not_found(bible::find_book(&conn, "Roundtrip%")));
        Ok(())
    });
}

#[test]
fn strongs_entry_counts_occurrences() {
    let conn = match test_conn() { Some(c) => c, None => return };

    conn.test_transaction::<_, Error, _>(|| {
        seed(&conn)?;

        let entry = bible::strongs(&conn, "h09001")?;
        assert_eq!(entry.entry.number, "H9001");
        assert_eq!(entry.occurrences, 2);

        assert!(is_not_found(bible::strongs(&conn, "H9002")));
        assert!(is_invalid(bible::strongs(&conn, "G2316")));
        Ok(())
    });
}
