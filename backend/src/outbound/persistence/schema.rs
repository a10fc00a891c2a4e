//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes a table.

diesel::table! {
    /// Administrator accounts. `username` is unique.
    admins (id) {
        id -> Int8,
        username -> Text,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Student accounts. `email` is unique (`students_email_key`).
    students (id) {
        id -> Int8,
        name -> Text,
        email -> Text,
        department -> Text,
        phone -> Nullable<Text>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Published events.
    events (id) {
        id -> Int8,
        name -> Text,
        description -> Text,
        /// `onstage` or `offstage`, enforced by `events_category_check`.
        category -> Text,
        max_participants -> Int4,
        registration_deadline -> Timestamptz,
        event_date -> Timestamptz,
        venue -> Text,
        created_by -> Int8,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// One row per (student, event) pair (`registrations_student_event_key`).
    registrations (id) {
        id -> Int8,
        student_id -> Int8,
        event_id -> Int8,
        registration_date -> Timestamptz,
        status -> Text,
    }
}

diesel::joinable!(events -> admins (created_by));
diesel::joinable!(registrations -> events (event_id));
diesel::joinable!(registrations -> students (student_id));

diesel::allow_tables_to_appear_in_same_query!(admins, events, registrations, students);
