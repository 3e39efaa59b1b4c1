use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Optional filters for a member search
///
/// Every field is optional and absent fields add no condition, so the
/// default value matches every member. Blank strings count as absent, which
/// lets `?teamName=&ageGoe=` bind to an empty condition.
///
/// # Example
/// ```
/// use roster_api::domain::search::MemberSearchCondition;
///
/// let condition = MemberSearchCondition {
///     team_name: Some("teamB".to_string()),
///     age_goe: Some(35),
///     ..Default::default()
/// };
///
/// assert_eq!(condition.team_name(), Some("teamB"));
/// assert_eq!(condition.username_substring(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchCondition {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub username_substring: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub age_goe: Option<i32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    /// Username fragment to match, if one was given
    pub fn username_substring(&self) -> Option<&str> {
        has_text(self.username_substring.as_deref())
    }

    /// Exact team name to match, if one was given
    pub fn team_name(&self) -> Option<&str> {
        has_text(self.team_name.as_deref())
    }

    /// Whether the condition filters nothing
    pub fn is_empty(&self) -> bool {
        self.username_substring().is_none()
            && self.team_name().is_none()
            && self.age_goe.is_none()
            && self.age_loe.is_none()
    }
}

fn has_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Deserializes query-string values, treating an empty value as absent
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_condition_is_empty() {
        assert!(MemberSearchCondition::default().is_empty());
    }

    #[test]
    fn blank_strings_count_as_absent() {
        let condition = MemberSearchCondition {
            username_substring: Some("   ".to_string()),
            team_name: Some(String::new()),
            ..Default::default()
        };

        assert_eq!(condition.username_substring(), None);
        assert_eq!(condition.team_name(), None);
        assert!(condition.is_empty());
    }

    #[test]
    fn any_age_bound_makes_condition_non_empty() {
        let condition = MemberSearchCondition {
            age_loe: Some(40),
            ..Default::default()
        };

        assert!(!condition.is_empty());
    }
}
