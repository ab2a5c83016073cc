//! Diesel table definitions; keep in step with `migrations/`.

diesel::table! {
    /// Tenants.
    companies (id) {
        id -> Uuid,
        /// Unique, 5 to 100 characters.
        name -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Accounts. `company_id` is null exactly for super admins.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        /// Unique across all tenants.
        email -> Varchar,
        /// `ROLE_USER`, `ROLE_COMPANY_ADMIN`, or `ROLE_SUPER_ADMIN`.
        role -> Varchar,
        company_id -> Nullable<Uuid>,
        /// Argon2id PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(users -> companies (company_id));
diesel::allow_tables_to_appear_in_same_query!(companies, users);
