use std::collections::BTreeMap;

pub fn parse_cookies(cookies_str: &str) -> Result<BTreeMap<&str, &str>, ()> {
	cookies_str
		.split(';')
		.map(|cookie| cookie.trim())
		.filter(|cookie| !cookie.is_empty())
		.map(|cookie| {
			let mut components = cookie.splitn(2, '=');
			let key = match components.next() {
				Some(key) => key,
				None => return Err(()),
			};
			let value = match components.next() {
				Some(value) => value,
				None => return Err(()),
			};
			Ok((key, value))
		})
		.collect()
}

#[test]
fn test_parse_cookies() {
	let cookies = parse_cookies("automl-timezone=Europe/Paris; theme=dark").unwrap();
	assert_eq!(cookies.get("automl-timezone"), Some(&"Europe/Paris"));
	assert_eq!(cookies.get("theme"), Some(&"dark"));
	assert!(parse_cookies("broken").is_err());
}
