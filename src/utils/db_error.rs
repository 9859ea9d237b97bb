/// Name of the unique constraint guarding `links.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "links_short_code_key";

/// Returns true when the error is a unique violation on the short code column.
///
/// The constraint is the authoritative uniqueness guarantee for short codes;
/// callers that pre-check availability still have to handle this case.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}
