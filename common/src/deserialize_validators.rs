use reqwest::Url;
use serde::{Deserialize, Deserializer, de::Error};

pub fn disallow_empty_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let input_string: Option<String> = Option::deserialize(deserializer)?;

    let Some(value) = input_string else {
        return Err(Error::custom("field is not a string"));
    };

    if value.is_empty() {
        return Err(Error::custom("field is empty"));
    }

    Ok(value)
}

/// Absent is fine, present-but-empty is not. Pair with `#[serde(default)]`.
pub fn optional_non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let input_string: Option<String> = Option::deserialize(deserializer)?;

    match input_string {
        Some(value) if value.is_empty() => Err(Error::custom("field is empty")),
        other => Ok(other),
    }
}

pub fn absolute_url<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    if let Err(err) = Url::parse(&value) {
        return Err(Error::custom(format!("invalid url {value:?}: {err}")));
    }

    Ok(value)
}

pub fn optional_absolute_url<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let input_string: Option<String> = Option::deserialize(deserializer)?;

    let Some(value) = input_string else {
        return Ok(None);
    };

    if let Err(err) = Url::parse(&value) {
        return Err(Error::custom(format!("invalid url {value:?}: {err}")));
    }

    Ok(Some(value))
}

pub fn non_empty_string_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Vec<String> = Vec::deserialize(deserializer)?;

    if values.iter().any(String::is_empty) {
        return Err(Error::custom("array contains an empty string"));
    }

    Ok(values)
}

pub fn optional_non_empty_string_vec<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values: Option<Vec<String>> = Option::deserialize(deserializer)?;

    if let Some(ref values) = values
        && values.iter().any(String::is_empty)
    {
        return Err(Error::custom("array contains an empty string"));
    }

    Ok(values)
}
