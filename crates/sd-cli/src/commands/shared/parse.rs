use std::str::FromStr;

/// Parse a wire enum from user input; `in-progress` reads as `IN_PROGRESS`.
pub fn parse_enum<T>(raw: &str, field: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let normalized = raw.trim().replace('-', "_");
    normalized
        .parse::<T>()
        .map_err(|error| anyhow::anyhow!("invalid {field} '{raw}': {error}"))
}

/// Parse an optional wire enum.
pub fn parse_opt<T>(raw: Option<&str>, field: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map(|raw| parse_enum(raw, field)).transpose()
}
