use chrono::prelude::*;
use chrono_tz::Tz;

/// Interpret a version token as a Unix timestamp in seconds.
///
/// Like `parseInt`, leading whitespace is skipped and parsing stops at the first character that is not a digit, so `"1700000000.5"` reads as `1700000000`. Returns `None` when no digits lead the token or the instant is out of range.
pub fn version_timestamp(token: &str) -> Option<DateTime<Utc>> {
	let token = token.trim_start();
	let (sign, digits) = match token.strip_prefix('-') {
		Some(rest) => (-1, rest),
		None => (1, token.strip_prefix('+').unwrap_or(token)),
	};
	let end = digits
		.char_indices()
		.find(|(_, c)| !c.is_ascii_digit())
		.map(|(index, _)| index)
		.unwrap_or_else(|| digits.len());
	let seconds: i64 = digits[..end].parse().ok()?;
	let millis = seconds.checked_mul(1000)?.checked_mul(sign)?;
	Utc.timestamp_millis_opt(millis).single()
}

pub fn format_date_time(date: DateTime<Tz>) -> String {
	date.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// The label of a version option, for example `Version 1700000000 (11/14/2023, 10:13:20 PM)`.
pub fn format_version_label(token: &str, timezone: Tz) -> String {
	let date = version_timestamp(token)
		.map(|date| format_date_time(date.with_timezone(&timezone)))
		.unwrap_or_else(|| "Invalid Date".to_owned());
	format!("Version {} ({})", token, date)
}

#[test]
fn test_format_version_label() {
	assert_eq!(
		format_version_label("1700000000", chrono_tz::UTC),
		"Version 1700000000 (11/14/2023, 10:13:20 PM)"
	);
	assert_eq!(
		format_version_label("1700003600", chrono_tz::Europe::Berlin),
		"Version 1700003600 (11/15/2023, 12:13:20 AM)"
	);
	assert_eq!(
		format_version_label("latest", chrono_tz::UTC),
		"Version latest (Invalid Date)"
	);
}

#[test]
fn test_version_timestamp_reads_leading_integer() {
	let expected = Utc.timestamp_opt(1_700_000_000, 0).single();
	assert_eq!(version_timestamp("1700000000"), expected);
	assert_eq!(version_timestamp(" 1700000000.5"), expected);
	assert_eq!(version_timestamp(""), None);
}
