//! Parsing of PostgreSQL constraint violation messages.
//!
//! Postgres reports constraint violations with messages like
//! `duplicate key value violates unique constraint "customers_phone_key"`
//! followed by `DETAIL: Key (phone)=(555-0100) already exists.`. This
//! module turns those into (entity, field, value) triples so the API can
//! return structured errors instead of raw database text.

/// Utility for parsing PostgreSQL constraint violation messages.
pub struct ConstraintParser;

impl ConstraintParser {
    /// Parses a unique constraint violation into (entity, field, value).
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_constraint_name(constraint) {
                let value = Self::extract_key_value(message)
                    .map(|(_, v)| v)
                    .unwrap_or_else(|| "duplicate_value".to_string());
                return Some((entity, field, value));
            }
        }
        let (field, value) = Self::extract_key_value(message)?;
        let entity = Self::extract_quoted(message, "table ")
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a not-null violation into (entity, field).
    pub fn parse_not_null_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let field = Self::extract_quoted(message, "column ")?;
        let entity = Self::extract_quoted(message, "relation ")
            .or_else(|| {
                constraint_name.and_then(|c| Self::parse_constraint_name(c).map(|(e, _)| e))
            })
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a foreign key violation into (entity, field, referenced value).
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some((entity, field)) = Self::parse_suffixed(constraint, "_fkey") {
                let value = Self::extract_key_value(message)
                    .map(|(_, v)| v)
                    .unwrap_or_else(|| "invalid_reference".to_string());
                return Some((entity, field, value));
            }
        }
        let (field, value) = Self::extract_key_value(message)?;
        let entity = Self::extract_quoted(message, "table ")
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a check violation into (entity, field).
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        if let Some(constraint) = constraint_name {
            if let Some(parsed) = Self::parse_suffixed(constraint, "_check") {
                return Some(parsed);
            }
        }
        let entity = Self::extract_quoted(message, "relation ")?;
        Some((entity, "unknown".to_string()))
    }

    /// Table names as they appear in constraint name prefixes, longest
    /// first so `tally_records` wins over a bare `tally` match.
    const TABLES: &'static [&'static str] = &[
        "appointment_services",
        "tally_records",
        "appointments",
        "customers",
        "employees",
        "services",
    ];

    /// Splits a conventional `{table}_{field}_key` constraint name.
    pub fn parse_constraint_name(constraint: &str) -> Option<(String, String)> {
        Self::parse_suffixed(constraint, "_key")
            .or_else(|| Self::parse_suffixed(constraint, "_fkey"))
            .or_else(|| Self::parse_suffixed(constraint, "_idx"))
            .or_else(|| Self::parse_suffixed(constraint, "_check"))
    }

    fn parse_suffixed(constraint: &str, suffix: &str) -> Option<(String, String)> {
        let stem = constraint.strip_suffix(suffix)?;

        // Table names contain underscores too, so a blind split on the
        // first one would garble e.g. `tally_records_total_cost_check`.
        // Match known tables first, then fall back to the split.
        for table in Self::TABLES {
            if let Some(rest) = stem.strip_prefix(table) {
                if let Some(field) = rest.strip_prefix('_') {
                    if !field.is_empty() {
                        return Some((table.to_string(), field.to_string()));
                    }
                }
            }
        }

        let (entity, field) = stem.split_once('_')?;
        if entity.is_empty() || field.is_empty() {
            return None;
        }
        Some((entity.to_string(), field.to_string()))
    }

    /// Extracts `(field, value)` from a `Key (field)=(value)` detail line.
    fn extract_key_value(message: &str) -> Option<(String, String)> {
        let start = message.find("Key (")? + "Key (".len();
        let rest = &message[start..];
        let field_end = rest.find(")=(")?;
        let field = &rest[..field_end];
        let value_part = &rest[field_end + ")=(".len()..];
        let value_end = value_part.find(')')?;
        Some((field.to_string(), value_part[..value_end].to_string()))
    }

    /// Extracts the quoted token following `prefix`, e.g. `table "users"`.
    fn extract_quoted(message: &str, prefix: &str) -> Option<String> {
        let needle = format!("{}\"", prefix);
        let start = message.find(&needle)? + needle.len();
        let rest = &message[start..];
        let end = rest.find('"')?;
        Some(rest[..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("customers_phone_key"),
            Some(("customers".to_string(), "phone".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("appointments_customer_id_fkey"),
            Some(("appointments".to_string(), "customer_id".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("nounderscore"), None);
    }

    #[test]
    fn test_parse_constraint_name_multi_word_table() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("tally_records_total_cost_check"),
            Some(("tally_records".to_string(), "total_cost".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("appointment_services_service_id_fkey"),
            Some((
                "appointment_services".to_string(),
                "service_id".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_with_detail() {
        let message = "duplicate key value violates unique constraint \"customers_phone_key\"\nDETAIL: Key (phone)=(555-0100) already exists.";
        let result =
            ConstraintParser::parse_unique_violation(message, Some("customers_phone_key"));
        assert_eq!(
            result,
            Some((
                "customers".to_string(),
                "phone".to_string(),
                "555-0100".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_detail() {
        let message = "duplicate key value violates unique constraint \"customers_phone_key\"";
        let result =
            ConstraintParser::parse_unique_violation(message, Some("customers_phone_key"));
        assert_eq!(
            result,
            Some((
                "customers".to_string(),
                "phone".to_string(),
                "duplicate_value".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_not_null_violation() {
        let message = "null value in column \"name\" of relation \"services\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message, None);
        assert_eq!(result, Some(("services".to_string(), "name".to_string())));
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let message = "insert or update on table \"appointments\" violates foreign key constraint \"appointments_customer_id_fkey\"\nDETAIL: Key (customer_id)=(999) is not present in table \"customers\".";
        let result = ConstraintParser::parse_foreign_key_violation(
            message,
            Some("appointments_customer_id_fkey"),
        );
        assert_eq!(
            result,
            Some((
                "appointments".to_string(),
                "customer_id".to_string(),
                "999".to_string()
            ))
        );
    }
}
