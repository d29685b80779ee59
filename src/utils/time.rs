use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

pub fn to_cookie_expiry(dt: DateTime<Utc>) -> time::OffsetDateTime {
    time::OffsetDateTime::from_unix_timestamp(dt.timestamp())
        .unwrap_or(time::OffsetDateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn cookie_expiry_keeps_the_second() {
        let dt = Utc.with_ymd_and_hms(2030, 5, 17, 8, 30, 15).unwrap();
        let converted = to_cookie_expiry(dt);
        assert_eq!(converted.unix_timestamp(), dt.timestamp());
    }
}
