//! Diesel schema for review persistence.

diesel::table! {
    /// Reviews exchanged after a finished job.
    reviews (id) {
        /// Review identifier.
        id -> Int8,
        /// Job reviewed.
        job_id -> Int8,
        /// Reviewer.
        rater_id -> Int8,
        /// Reviewed party.
        ratee_id -> Int8,
        /// Reviewer's side of the engagement.
        #[max_length = 50]
        rater_role -> Varchar,
        /// Star rating.
        rating -> Int2,
        /// Optional comment.
        comment -> Nullable<Text>,
        /// Whether the single edit has been used.
        edited -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
