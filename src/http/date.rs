use std::time::{SystemTime, UNIX_EPOCH};

/// `9999-12-31 23:59:59`, the last second representable in an IMF-fixdate.
const MAX_SECS: u64 = 253_402_300_799;

const DAY_NAMES: [&[u8; 3]; 7] = [b"Mon", b"Tue", b"Wed", b"Thu", b"Fri", b"Sat", b"Sun"];
const MONTH_NAMES: [&[u8; 3]; 12] = [
    b"Jan", b"Feb", b"Mar", b"Apr", b"May", b"Jun",
    b"Jul", b"Aug", b"Sep", b"Oct", b"Nov", b"Dec",
];

/// Create [httpdate][rfc] for current time.
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#section-5.6.7>
#[inline]
pub fn httpdate_now() -> [u8; 29] {
    httpdate(SystemTime::now())
}

/// Create [httpdate][rfc] with given time.
///
/// Time before the unix epoch is clamped to the epoch, time after year 9999 is clamped to the
/// last second of 9999.
///
/// [rfc]: <https://datatracker.ietf.org/doc/html/rfc9110#section-5.6.7>
pub fn httpdate(v: SystemTime) -> [u8; 29] {
    let secs = v
        .duration_since(UNIX_EPOCH)
        .map(|e| e.as_secs())
        .unwrap_or(0)
        .min(MAX_SECS);

    let (year, mon, mday) = civil_from_days((secs / 86400) as i64);
    let secs_of_day = secs % 86400;

    // 1970-01-01 is a thursday
    let wday = ((secs / 86400) + 3) % 7;

    // ===== Write =====
    // https://www.rfc-editor.org/rfc/rfc9110#section-5.6.7

    let mut buf: [u8; 29] = *b"ddd, 00 mmm 1970 00:00:00 GMT";

    buf[..3].copy_from_slice(DAY_NAMES[wday as usize]);
    put_2digit(&mut buf[5..7], mday);
    buf[8..11].copy_from_slice(MONTH_NAMES[(mon - 1) as usize]);
    put_2digit(&mut buf[12..14], year / 100);
    put_2digit(&mut buf[14..16], year % 100);
    put_2digit(&mut buf[17..19], (secs_of_day / 3600) as u32);
    put_2digit(&mut buf[20..22], (secs_of_day % 3600 / 60) as u32);
    put_2digit(&mut buf[23..25], (secs_of_day % 60) as u32);

    buf
}

fn put_2digit(buf: &mut [u8], value: u32) {
    buf[0] = b'0' + (value / 10 % 10) as u8;
    buf[1] = b'0' + (value % 10) as u8;
}

/// Convert days since unix epoch into `(year, month, day)`.
///
/// Counts in 400 year eras starting at 0000-03-01, so the leap day is the last day of a year.
fn civil_from_days(days: i64) -> (u32, u32, u32) {
    const DAYS_PER_400Y: i64 = 365 * 400 + 97;

    let z = days + 719_468;
    let era = z.div_euclid(DAYS_PER_400Y);
    let doe = z.rem_euclid(DAYS_PER_400Y);
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + i64::from(month <= 2);

    (year as u32, month as u32, day as u32)
}
