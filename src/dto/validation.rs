//! Validation helpers for DTOs.

use validator::ValidationError;

/// Rejects values that are empty once surrounding whitespace is removed.
///
/// # Examples
///
/// ```ignore
/// validate_not_blank("Birds") // Ok
/// validate_not_blank("   ")   // Err
/// ```
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("value must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Rejects a game whose home and away team are the same team.
pub fn validate_distinct_teams(
    home: Option<uuid::Uuid>,
    away: Option<uuid::Uuid>,
) -> Result<(), ValidationError> {
    match (home, away) {
        (Some(home), Some(away)) if home == away => {
            let mut err = ValidationError::new("same_team");
            err.message = Some("home and away team must differ".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn test_validate_not_blank() {
        assert!(validate_not_blank("Birds").is_ok());
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank(" \t").is_err());
    }

    #[test]
    fn test_validate_distinct_teams() {
        let birds = Uuid::new_v4();
        let ducks = Uuid::new_v4();
        assert!(validate_distinct_teams(Some(birds), Some(ducks)).is_ok());
        assert!(validate_distinct_teams(Some(birds), None).is_ok());
        assert!(validate_distinct_teams(Some(birds), Some(birds)).is_err());
    }
}
