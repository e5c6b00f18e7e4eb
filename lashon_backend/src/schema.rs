table! {
    achievement_progress (user_id, achievement_id) {
        user_id -> Int4,
        achievement_id -> Int4,
        progress -> Int4,
        unlocked -> Bool,
        unlocked_at -> Nullable<Timestamptz>,
    }
}

table! {
    achievements (id) {
        id -> Int4,
        code -> Varchar,
        title -> Varchar,
        description -> Text,
        icon -> Nullable<Varchar>,
        xp_reward -> Int4,
        criteria -> Jsonb,
        position -> Int4,
    }
}

table! {
    bible_books (id) {
        id -> Int4,
        slug -> Varchar,
        name -> Varchar,
        hebrew_name -> Varchar,
        chapters -> Int4,
    }
}

table! {
    bible_verses (id) {
        id -> Int4,
        book_id -> Int4,
        chapter -> Int4,
        verse -> Int4,
        hebrew -> Text,
        translation -> Nullable<Text>,
    }
}

table! {
    bible_words (id) {
        id -> Int4,
        verse_id -> Int4,
        position -> Int4,
        hebrew -> Varchar,
        transliteration -> Nullable<Varchar>,
        strongs -> Nullable<Varchar>,
        morphology -> Nullable<Varchar>,
        gloss -> Nullable<Varchar>,
    }
}

table! {
    card_reviews (id) {
        id -> Int4,
        user_id -> Int4,
        word_id -> Int4,
        review_key -> Nullable<Varchar>,
        correct -> Bool,
        reviewed_at -> Timestamptz,
    }
}

table! {
    group_memberships (user_id, group_id) {
        user_id -> Int4,
        group_id -> Int4,
    }
}

table! {
    lesson_steps (id) {
        id -> Int4,
        lesson_id -> Int4,
        position -> Int4,
        title -> Varchar,
        content -> Jsonb,
    }
}

table! {
    lessons (id) {
        id -> Int4,
        slug -> Varchar,
        title -> Varchar,
        description -> Text,
        position -> Int4,
        xp_reward -> Int4,
        min_quiz_score -> Int4,
        published -> Bool,
    }
}

table! {
    quiz_attempts (id) {
        id -> Int4,
        user_id -> Int4,
        lesson_id -> Int4,
        score -> Int4,
        correct_answers -> Int4,
        total_questions -> Int4,
        passed -> Bool,
        xp_awarded -> Int4,
        submitted_at -> Timestamptz,
    }
}

table! {
    quiz_questions (id) {
        id -> Int4,
        lesson_id -> Int4,
        position -> Int4,
        prompt -> Text,
        options -> Jsonb,
        correct_answer -> Varchar,
        explanation -> Nullable<Text>,
    }
}

table! {
    sessions (id) {
        id -> Int4,
        user_id -> Int4,
        token -> Varchar,
        started -> Timestamptz,
        last_seen -> Timestamptz,
    }
}

table! {
    strongs_hebrew (number) {
        number -> Varchar,
        lemma -> Varchar,
        transliteration -> Nullable<Varchar>,
        pronunciation -> Nullable<Varchar>,
        definition -> Text,
        kjv_usage -> Nullable<Text>,
    }
}

table! {
    study_sessions (id) {
        id -> Int4,
        user_id -> Int4,
        kind -> Varchar,
        started_at -> Timestamptz,
        duration_seconds -> Int4,
        cards_studied -> Int4,
        correct_count -> Int4,
        xp_earned -> Int4,
    }
}

table! {
    user_groups (id) {
        id -> Int4,
        group_name -> Varchar,
    }
}

table! {
    user_lesson_progress (user_id, lesson_id) {
        user_id -> Int4,
        lesson_id -> Int4,
        status -> Varchar,
        current_step -> Int4,
        started_at -> Nullable<Timestamptz>,
        completed_at -> Nullable<Timestamptz>,
        best_score -> Nullable<Int4>,
    }
}

table! {
    user_progress (user_id, word_id) {
        user_id -> Int4,
        word_id -> Int4,
        level -> Int4,
        next_review -> Timestamptz,
        last_review -> Nullable<Timestamptz>,
        review_count -> Int4,
        correct_count -> Int4,
    }
}

table! {
    user_stats (user_id) {
        user_id -> Int4,
        xp -> Int4,
        level -> Int4,
        streak -> Int4,
        longest_streak -> Int4,
        last_studied -> Nullable<Date>,
        daily_goal -> Int4,
        cards_today -> Int4,
        last_reset -> Nullable<Date>,
        total_reviews -> Int4,
        total_correct -> Int4,
        perfect_quizzes -> Int4,
        updated_at -> Timestamptz,
    }
}

table! {
    users (id) {
        id -> Int4,
        name -> Varchar,
        email -> Nullable<Varchar>,
        joined -> Timestamptz,
        last_seen -> Timestamptz,
    }
}

table! {
    vocab_sets (id) {
        id -> Int4,
        name -> Varchar,
        description -> Text,
        position -> Int4,
        created_at -> Timestamptz,
    }
}

table! {
    vocab_words (id) {
        id -> Int4,
        set_id -> Int4,
        position -> Int4,
        hebrew -> Varchar,
        search_key -> Varchar,
        transliteration -> Varchar,
        gloss -> Varchar,
        part_of_speech -> Nullable<Varchar>,
        gender -> Nullable<Varchar>,
        strongs -> Nullable<Varchar>,
        frequency -> Nullable<Int4>,
    }
}

joinable!(achievement_progress -> achievements (achievement_id));
joinable!(achievement_progress -> users (user_id));
joinable!(bible_verses -> bible_books (book_id));
joinable!(bible_words -> bible_verses (verse_id));
joinable!(card_reviews -> users (user_id));
joinable!(card_reviews -> vocab_words (word_id));
joinable!(group_memberships -> user_groups (group_id));
joinable!(group_memberships -> users (user_id));
joinable!(lesson_steps -> lessons (lesson_id));
joinable!(quiz_attempts -> lessons (lesson_id));
joinable!(quiz_attempts -> users (user_id));
joinable!(quiz_questions -> lessons (lesson_id));
joinable!(sessions -> users (user_id));
joinable!(study_sessions -> users (user_id));
joinable!(user_lesson_progress -> lessons (lesson_id));
joinable!(user_lesson_progress -> users (user_id));
joinable!(user_progress -> users (user_id));
joinable!(user_progress -> vocab_words (word_id));
joinable!(user_stats -> users (user_id));
joinable!(vocab_words -> vocab_sets (set_id));

allow_tables_to_appear_in_same_query!(
    achievement_progress,
    achievements,
    bible_books,
    bible_verses,
    bible_words,
    card_reviews,
    group_memberships,
    lesson_steps,
    lessons,
    quiz_attempts,
    quiz_questions,
    sessions,
    strongs_hebrew,
    study_sessions,
    user_groups,
    user_lesson_progress,
    user_progress,
    user_stats,
    users,
    vocab_sets,
    vocab_words,
);
