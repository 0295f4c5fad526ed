use super::cookies::parse_cookies;
use chrono_tz::{Tz, UTC};
use http::{header, HeaderMap};

pub const TIMEZONE_COOKIE: &str = "automl-timezone";

/// The viewer's timezone, read from the timezone cookie the browser client sets. Defaults to UTC.
pub fn get_timezone(headers: &HeaderMap) -> Tz {
	headers
		.get(header::COOKIE)
		.and_then(|cookie_header_value| cookie_header_value.to_str().ok())
		.and_then(|cookie_header_value| parse_cookies(cookie_header_value).ok())
		.and_then(|cookies| cookies.get(TIMEZONE_COOKIE).map(|value| value.replace("%2F", "/")))
		.and_then(|timezone_str| timezone_str.parse().ok())
		.unwrap_or(UTC)
}

#[test]
fn test_get_timezone() {
	let mut headers = HeaderMap::new();
	assert_eq!(get_timezone(&headers), UTC);
	headers.insert(
		header::COOKIE,
		"automl-timezone=America%2FNew_York".parse().unwrap(),
	);
	assert_eq!(get_timezone(&headers), chrono_tz::America::New_York);
	headers.insert(header::COOKIE, "automl-timezone=Mars/Base".parse().unwrap());
	assert_eq!(get_timezone(&headers), UTC);
}
