// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum character count for an employee family or given name.
///
/// The grid renders names in a fixed-width row header; longer names are
/// rejected at the boundary rather than truncated.
pub const NAME_MAX_CHARS: usize = 10;

/// Validates employee name fields.
///
/// The family name is required; the given name is optional. Both are
/// limited to [`NAME_MAX_CHARS`] characters, counted as characters rather
/// than bytes since names are routinely non-ASCII.
///
/// # Arguments
///
/// * `family_name` - The required family name
/// * `given_name` - The optional given name
///
/// # Errors
///
/// Returns an error if the family name is empty after trimming, or either
/// name exceeds the limit.
pub fn validate_employee_name(
    family_name: &str,
    given_name: Option<&str>,
) -> Result<(), DomainError> {
    if family_name.trim().is_empty() {
        return Err(DomainError::EmptyFamilyName);
    }
    if family_name.chars().count() > NAME_MAX_CHARS {
        return Err(DomainError::NameTooLong {
            field: "family name",
            value: family_name.to_string(),
            max: NAME_MAX_CHARS,
        });
    }
    if let Some(given) = given_name
        && given.chars().count() > NAME_MAX_CHARS
    {
        return Err(DomainError::NameTooLong {
            field: "given name",
            value: given.to_string(),
            max: NAME_MAX_CHARS,
        });
    }
    Ok(())
}
