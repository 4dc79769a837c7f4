use chrono::NaiveDate;

use crate::errors::PrepareError;

/// Extracts the calendar-date portion of an ISO-8601 UTC timestamp, e.g.
/// `"2013-03-20T17:11:17Z"` -> `"2013-03-20"`.
pub fn parse_date(raw: &str) -> Result<String, PrepareError> {
    let malformed = || PrepareError::MalformedTimestamp {
        raw: raw.to_owned(),
    };

    let (date, time) = raw.split_once('T').ok_or_else(malformed)?;
    if time.is_empty() {
        return Err(malformed());
    }

    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| malformed())?;

    Ok(date.to_owned())
}

/// Reduces an extraction-tool MIME string to its bare subtype, e.g.
/// `"application/pdf; version\x011.6"` -> `"pdf"`.
///
/// Best-effort on purpose: an odd type string on one document must not sink
/// the rest of the batch, so unrecognized shapes are truncated, not rejected.
pub fn clean_file_type(raw: &str) -> String {
    let subtype = raw.rsplit('/').next().unwrap_or(raw);
    let subtype = subtype.split(';').next().unwrap_or(subtype);
    let subtype = subtype.split('\u{1}').next().unwrap_or(subtype);
    subtype.trim().to_owned()
}
