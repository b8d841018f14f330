use crate::config::LimitsConfig;
use crate::error::{BoothError, BoothResult};

/// Account names: minimum length, no whitespace
pub fn validate_account_name(limits: &LimitsConfig, name: &str) -> BoothResult<()> {
    if name.chars().count() < limits.min_account_name_len {
        return Err(BoothError::invalid_input(
            "display_name",
            format!("must be at least {} characters", limits.min_account_name_len),
        ));
    }

    if name.chars().any(char::is_whitespace) {
        return Err(BoothError::invalid_input("display_name", "cannot contain spaces"));
    }

    Ok(())
}

/// Passcodes: exactly `passcode_digits` ASCII digits
pub fn validate_passcode(limits: &LimitsConfig, passcode: &str) -> BoothResult<()> {
    if passcode.len() != limits.passcode_digits || !passcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(BoothError::invalid_input(
            "credential",
            format!("must be {} digits", limits.passcode_digits),
        ));
    }
    Ok(())
}

/// Booth names are checked after trimming
pub fn validate_booth_name(limits: &LimitsConfig, name: &str) -> BoothResult<()> {
    if name.trim().chars().count() < limits.min_booth_name_len {
        return Err(BoothError::invalid_input(
            "name",
            format!("must be at least {} characters", limits.min_booth_name_len),
        ));
    }
    Ok(())
}

/// Checked regardless of `enforce_formats`
pub fn validate_vote_count(limits: &LimitsConfig, vote_count: u32) -> BoothResult<()> {
    if vote_count == 0 || vote_count > limits.max_vote_count {
        return Err(BoothError::out_of_range(
            "vote_count",
            vote_count as u64,
            1,
            limits.max_vote_count as u64,
        ));
    }
    Ok(())
}
