//! Request field validation and normalisation

use crate::utils::error::{ClubError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;

/// Maximum stored length of an event description, in characters
pub const MAX_DESCRIPTION_CHARS: usize = 5000;

/// Field validation utilities
pub struct FieldValidator;

impl FieldValidator {
    /// Require a non-blank string field, returning it trimmed
    pub fn required(field: &str, value: Option<&str>) -> Result<String> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v.to_string()),
            _ => Err(ClubError::validation(format!("{} is required", field))),
        }
    }

    /// Trim an optional string field, mapping blank values to `None`
    pub fn optional(value: Option<&str>) -> Option<String> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Trim, lower-case and syntax-check an email address
    pub fn normalize_email(email: &str) -> Result<String> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ClubError::validation("email is required"));
        }

        let email_regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .map_err(|e| ClubError::Internal(format!("Regex error: {}", e)))?;

        if !email_regex.is_match(&email) {
            return Err(ClubError::validation("Invalid email address"));
        }

        Ok(email)
    }

    /// Domain part of an already-normalised email address
    pub fn email_domain(email: &str) -> Option<&str> {
        email.rsplit_once('@').map(|(_, domain)| domain)
    }

    /// Normalise a configured email domain: trim, drop a leading `@`, lower-case
    pub fn normalize_domain(domain: Option<&str>) -> Option<String> {
        domain
            .map(|d| d.trim().trim_start_matches('@').to_lowercase())
            .filter(|d| !d.is_empty())
    }

    /// Validate password length
    pub fn validate_password(password: &str) -> Result<()> {
        let len = password.chars().count();
        if len < 8 {
            return Err(ClubError::validation(
                "Password must be at least 8 characters",
            ));
        }
        if len > 128 {
            return Err(ClubError::validation(
                "Password cannot exceed 128 characters",
            ));
        }
        Ok(())
    }

    /// Parse an RFC 3339 timestamp or a `YYYY-MM-DDTHH:MM[:SS]` value read as UTC
    pub fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>> {
        let value = value.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
            return Ok(ts.with_timezone(&Utc));
        }

        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| ClubError::validation(format!("{} must be a valid date-time", field)))
    }

    /// Require `start` to precede `end`
    pub fn validate_time_range(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Result<()> {
        if start >= end {
            return Err(ClubError::validation(
                "start_time must be before end_time",
            ));
        }
        Ok(())
    }

    /// Require a non-negative capacity
    pub fn validate_capacity(capacity: Option<i32>) -> Result<()> {
        match capacity {
            Some(c) if c < 0 => Err(ClubError::validation(
                "capacity must be a non-negative integer",
            )),
            _ => Ok(()),
        }
    }

    /// Truncate to at most `max` characters on a char boundary
    pub fn truncate(value: &str, max: usize) -> String {
        value.chars().take(max).collect()
    }
}
