pub mod date_time {
    use chrono::{DateTime, Utc};
    use serde::{de::Error, de::IntoDeserializer, Deserialize as _, Deserializer};

    /// Deserializes an RFC 3339 string into a UTC date time.
    pub fn deserialize_utc<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&s)
            .map(|date_time| date_time.with_timezone(&Utc))
            .map_err(Error::custom)
    }

    /// Like [`deserialize_utc`], but a missing or empty value is `None`.
    pub fn deserialize_utc_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        match s {
            Some(s) if !s.is_empty() => {
                let date_time = deserialize_utc(s.as_str().into_deserializer())?;
                Ok(Some(date_time))
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    use super::date_time;

    #[derive(Deserialize)]
    struct Params {
        #[serde(deserialize_with = "date_time::deserialize_utc_option", default)]
        after: Option<DateTime<Utc>>,
    }

    #[test]
    fn parses_offset_into_utc() {
        let params: Params =
            serde_json::from_str(r#"{"after":"2024-01-02T05:04:05+02:00"}"#).unwrap();
        assert_eq!(
            params.after,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
        );
    }

    #[test]
    fn missing_and_empty_are_none() {
        let params: Params = serde_json::from_str("{}").unwrap();
        assert!(params.after.is_none());
        let params: Params = serde_json::from_str(r#"{"after":""}"#).unwrap();
        assert!(params.after.is_none());
    }

    #[test]
    fn rejects_non_rfc3339() {
        assert!(serde_json::from_str::<Params>(r#"{"after":"yesterday"}"#).is_err());
    }
}
