//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly; `diesel print-schema` can regenerate them from a live database.

diesel::table! {
    /// User accounts. `email` carries a unique index; it is the invariant
    /// guard for duplicate signups and concurrent federated provisioning.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Unique, lowercased email address.
        email -> Varchar,
        /// Display name shown on hosted events.
        name -> Varchar,
        /// PHC-format Argon2 hash; null for federated-only accounts.
        password_hash -> Nullable<Text>,
        /// Optional avatar image reference.
        avatar -> Nullable<Text>,
        /// Identity source: `credentials` or `google`.
        provider -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Event listings.
    events (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Event title.
        title -> Varchar,
        /// Sport discipline.
        sport -> Varchar,
        /// Host city.
        city -> Varchar,
        /// Start date as entered by the host.
        start -> Varchar,
        /// Participation type.
        participation_type -> Varchar,
        /// Entry fee in whole currency units; never negative.
        fee -> Int8,
        /// Prize description.
        prize -> Text,
        /// Optional banner image reference.
        banner -> Nullable<Text>,
        /// Organiser name.
        organiser -> Varchar,
        /// Optional requirements text.
        requirements -> Nullable<Text>,
        /// Optional payment-QR image reference.
        payment_qr -> Nullable<Text>,
        /// Optional participant chat link.
        chat_link -> Nullable<Text>,
        /// Ordered custom questions asked at registration.
        custom_questions -> Array<Text>,
        /// Owning user; null for events created before ownership tracking.
        creator_id -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Participant registrations. Append-only; deliberately no foreign key
    /// to `events` so registrations survive event deletion (orphaning is
    /// accepted source behaviour).
    registrations (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning event identifier.
        event_id -> Uuid,
        /// Registrant name.
        name -> Varchar,
        /// Registrant contact email.
        email -> Varchar,
        /// Optional contact phone.
        phone -> Nullable<Varchar>,
        /// Optional payment transaction reference.
        transaction_reference -> Nullable<Text>,
        /// Optional payment-proof image reference.
        payment_proof -> Nullable<Text>,
        /// Ordered (question, answer) pairs as JSON.
        answers -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, events, registrations);
