use super::*;
use crate::schema::{bible_books, bible_verses, bible_words, strongs_hebrew};
use diesel::sql_types::Text;
use serde::Serialize;

sql_function!(fn lower(x: Text) -> Text);

pub fn books(conn: &PgConnection) -> Result<Vec<BibleBook>> {
    let books = bible_books::table
        .order(bible_books::id)
        .load(conn)?;
    Ok(books)
}

/// Accepts a slug (`genesis`), a name (`Genesis`) or a book number.
/// Names compare case-insensitively but never as patterns.
pub fn find_book(conn: &PgConnection, book: &str) -> Result<BibleBook> {
    let book = book.trim();
    let found = match book.parse::<i32>() {
        Ok(id) => bible_books::table.find(id).get_result(conn).optional()?,
        Err(_) => bible_books::table
            .filter(bible_books::slug.eq(book.to_lowercase())
                .or(lower(bible_books::name).eq(lower(book))))
            .first(conn)
            .optional()?,
    };
    Ok(try_or!(found, else bail!(ErrorKind::NotFound("Book"))))
}

#[derive(Debug, Clone, Serialize)]
pub struct VerseView {
    #[serde(flatten)]
    pub verse: BibleVerse,
    pub words: Vec<BibleWord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Chapter {
    pub book: BibleBook,
    pub chapter: i32,
    pub previous: Option<i32>,
    pub next: Option<i32>,
    pub verses: Vec<VerseView>,
}

pub fn chapter(conn: &PgConnection, book: &str, chapter: i32) -> Result<Chapter> {
    let book = find_book(conn, book)?;
    if chapter < 1 || chapter > book.chapters {
        bail!(ErrorKind::NotFound("Chapter"));
    }

    let verses: Vec<BibleVerse> = BibleVerse::belonging_to(&book)
        .filter(bible_verses::chapter.eq(chapter))
        .order(bible_verses::verse)
        .load(conn)?;

    let words: Vec<BibleWord> = BibleWord::belonging_to(&verses)
        .order((bible_words::verse_id, bible_words::position))
        .load(conn)?;
    let grouped = words.grouped_by(&verses);

    let verses = verses.into_iter()
        .zip(grouped)
        .map(|(verse, words)| VerseView { verse, words })
        .collect();

    Ok(Chapter {
        previous: if chapter > 1 { Some(chapter - 1) } else { None },
        next: if chapter < book.chapters { Some(chapter + 1) } else { None },
        chapter,
        book,
        verses,
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct StrongsView {
    #[serde(flatten)]
    pub entry: StrongsEntry,
    pub occurrences: i64,
}

pub fn strongs(conn: &PgConnection, number: &str) -> Result<StrongsView> {
    let number = hebrew::normalize_strongs(number)?;

    let entry: StrongsEntry = try_or!(strongs_hebrew::table.find(&number).get_result(conn).optional()?,
        else bail!(ErrorKind::NotFound("Strong's entry")));

    let occurrences = bible_words::table
        .filter(bible_words::strongs.eq(&number))
        .count()
        .get_result(conn)?;

    Ok(StrongsView { entry, occurrences })
}
