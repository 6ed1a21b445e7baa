//! Canonical string form of a state's property assignment.
//!
//! The same string keys baked models at registration time and at lookup time,
//! so every path that derives a model key goes through [`state_properties_to_string`].

use crate::error::BlockError;

pub const ACTIVE_PROPERTY: &str = "active";
pub const VARIANT_PROPERTY: &str = "variant";

/// Key used when a state has no properties at all.
pub const NO_PROPERTIES: &str = "normal";

/// Joins `name=value` pairs sorted by property name with `,`.
pub fn state_properties_to_string<'a, I>(props: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut pairs: Vec<(&str, &str)> = props.into_iter().collect();
    if pairs.is_empty() {
        return NO_PROPERTIES.to_string();
    }
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    let mut out = String::new();
    for (name, value) in pairs {
        if !out.is_empty() {
            out.push(',');
        }
        out.push_str(name);
        out.push('=');
        out.push_str(value);
    }
    out
}

/// Splits a property string back into pairs. `normal` yields no pairs.
pub fn parse_property_string(s: &str) -> Result<Vec<(&str, &str)>, BlockError> {
    let s = s.trim();
    if s.is_empty() || s == NO_PROPERTIES {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|kv| {
            let (k, v) = kv
                .split_once('=')
                .ok_or_else(|| BlockError::MalformedProperty(kv.to_string()))?;
            let (k, v) = (k.trim(), v.trim());
            if k.is_empty() || v.is_empty() {
                return Err(BlockError::MalformedProperty(kv.to_string()));
            }
            Ok((k, v))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_normal() {
        assert_eq!(state_properties_to_string(std::iter::empty()), "normal");
        assert!(parse_property_string("normal").unwrap().is_empty());
    }

    #[test]
    fn reorders_by_name() {
        let pairs = parse_property_string("variant=steel, active=true").unwrap();
        assert_eq!(pairs, [("variant", "steel"), ("active", "true")]);
        assert_eq!(state_properties_to_string(pairs), "active=true,variant=steel");
    }

    #[test]
    fn rejects_missing_value() {
        assert!(parse_property_string("variant").is_err());
        assert!(parse_property_string("variant=").is_err());
    }
}
