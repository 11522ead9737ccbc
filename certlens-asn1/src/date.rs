//! UTCTime and GeneralizedTime.
//!
//! Both decode to an `OffsetDateTime` in UTC. Explicit `+HHMM` / `-HHMM`
//! offsets are folded into the instant; forms without a zone are refused.

use crate::error::{Asn1Error, Result};
use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time};

trait DateDigitReader {
    fn read_digits(&self, idx: usize, count: usize) -> Option<u32>;
}

impl DateDigitReader for [u8] {
    fn read_digits(&self, idx: usize, count: usize) -> Option<u32> {
        let digits = self.get(idx..idx + count)?;
        digits.iter().try_fold(0u32, |acc, byte| {
            byte.is_ascii_digit().then(|| acc * 10 + u32::from(byte - b'0'))
        })
    }
}

/// `YYMMDDHHMMSS` followed by `Z` or an offset. Years below 50 are 20YY.
pub fn decode_utc_time(content: &[u8], offset: usize) -> Result<OffsetDateTime> {
    let invalid = |reason| Asn1Error::InvalidTime { offset, reason };

    let yy = content.read_digits(0, 2).ok_or_else(|| invalid("malformed year"))?;
    let year = if yy < 50 { 2000 + yy } else { 1900 + yy };

    let (date_time, zone) = read_date_time(content, 2, year, offset)?;
    if zone.is_empty() {
        return Err(invalid("missing time zone"));
    }

    apply_zone(date_time, zone, offset)
}

/// `YYYYMMDDHHMMSS[.f+]` followed by `Z` or an offset.
pub fn decode_generalized_time(content: &[u8], offset: usize) -> Result<OffsetDateTime> {
    let invalid = |reason| Asn1Error::InvalidTime { offset, reason };

    let year = content.read_digits(0, 4).ok_or_else(|| invalid("malformed year"))?;
    let (date_time, mut zone) = read_date_time(content, 4, year, offset)?;

    let mut nanos = 0u32;
    if let Some((b'.', fraction)) = zone.split_first() {
        let digits = fraction.iter().take_while(|b| b.is_ascii_digit()).count();
        if digits == 0 {
            return Err(invalid("empty fraction of second"));
        }
        if digits > 9 {
            return Err(invalid("fraction of second finer than nanoseconds"));
        }

        let value = fraction.read_digits(0, digits).ok_or_else(|| invalid("malformed fraction"))?;
        nanos = value * 10u32.pow(9 - digits as u32);
        zone = &fraction[digits..];
    }

    if zone.is_empty() {
        return Err(invalid("missing time zone"));
    }

    let time = Time::from_hms_nano(date_time.hour(), date_time.minute(), date_time.second(), nanos)
        .map_err(|_| invalid("malformed fraction"))?;
    let date_time = date_time.replace_time(time);
    apply_zone(date_time, zone, offset)
}

/// Reads `MMDDHHMMSS` starting at `idx` and returns the rest of the content.
fn read_date_time(content: &[u8], idx: usize, year: u32, offset: usize) -> Result<(PrimitiveDateTime, &[u8])> {
    let invalid = |reason| Asn1Error::InvalidTime { offset, reason };

    let mut fields = [0u8; 5];
    for (i, field) in fields.iter_mut().enumerate() {
        let value = content
            .read_digits(idx + i * 2, 2)
            .ok_or_else(|| invalid("wrong number of digits"))?;
        *field = value as u8;
    }
    let [month, day, hour, minute, second] = fields;

    let month = Month::try_from(month).map_err(|_| invalid("month out of range"))?;
    let date = Date::from_calendar_date(year as i32, month, day).map_err(|_| invalid("day out of range"))?;
    let time = Time::from_hms(hour, minute, second).map_err(|_| invalid("time of day out of range"))?;

    Ok((PrimitiveDateTime::new(date, time), &content[idx + 10..]))
}

fn apply_zone(date_time: PrimitiveDateTime, zone: &[u8], offset: usize) -> Result<OffsetDateTime> {
    let invalid = |reason| Asn1Error::InvalidTime { offset, reason };

    match zone {
        [b'Z'] => Ok(date_time.assume_utc()),
        [sign @ (b'+' | b'-'), rest @ ..] if rest.len() == 4 => {
            let hours = rest.read_digits(0, 2).ok_or_else(|| invalid("malformed offset"))?;
            let minutes = rest.read_digits(2, 2).ok_or_else(|| invalid("malformed offset"))?;
            if hours > 23 || minutes > 59 {
                return Err(invalid("offset out of range"));
            }

            // local = utc + offset
            let shift = Duration::minutes(i64::from(hours * 60 + minutes));
            let utc = if *sign == b'+' {
                date_time.checked_sub(shift)
            } else {
                date_time.checked_add(shift)
            };

            utc.map(PrimitiveDateTime::assume_utc)
                .ok_or_else(|| invalid("instant out of range"))
        }
        _ => Err(invalid("malformed time zone")),
    }
}
