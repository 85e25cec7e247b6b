//! Diesel schema for job board persistence.

diesel::table! {
    /// Posted jobs with their optimistic concurrency version.
    jobs (id) {
        /// Job identifier.
        id -> Int8,
        /// Owning customer.
        customer_id -> Int8,
        /// Job title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Optional budget in minor currency units.
        budget_minor_units -> Nullable<Int8>,
        /// Required skills as a JSON array of strings.
        required_skills -> Jsonb,
        /// Job lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Number of applications ever submitted.
        applications_count -> Int4,
        /// Board version, bumped on every save.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Applications submitted against jobs.
    applications (id) {
        /// Application identifier.
        id -> Int8,
        /// Job applied to.
        job_id -> Int8,
        /// Applying tasker.
        tasker_id -> Int8,
        /// Application lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Cover letter sent with the application.
        cover_letter -> Nullable<Text>,
        /// Tagged termination or resignation reason.
        closing_note -> Nullable<Jsonb>,
        /// Optional proposed budget in minor currency units.
        proposed_budget_minor_units -> Nullable<Int8>,
        /// When the tasker was hired, if ever.
        accepted_at -> Nullable<Timestamptz>,
        /// When the application reached a terminal status.
        closed_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Last withdrawal per `(job, tasker)` that still blocks reapplying.
    reapplication_cooldowns (job_id, tasker_id) {
        /// Job withdrawn from.
        job_id -> Int8,
        /// Withdrawing tasker.
        tasker_id -> Int8,
        /// Withdrawal timestamp the cooldown runs from.
        anchored_at -> Timestamptz,
    }
}

diesel::joinable!(applications -> jobs (job_id));
diesel::joinable!(reapplication_cooldowns -> jobs (job_id));

diesel::allow_tables_to_appear_in_same_query!(jobs, applications, reapplication_cooldowns);
