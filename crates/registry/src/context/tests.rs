use super::*;

#[test]
fn test_defaults_apply_to_missing_keys() {
	let ctx = ConstructionContext::new();
	assert!(ctx.is_empty());
	assert_eq!(ctx.get_size("lookahead", 7).unwrap(), 7);
	assert_eq!(ctx.get_i32("height", 4).unwrap(), 4);
	assert!(ctx.get_bool("flag", true).unwrap());
	assert_eq!(ctx.get_str("delimiter", ",").unwrap(), ",");
}

#[test]
fn test_toml_table_is_parsed() {
	let ctx = ConstructionContext::from_toml_str(
		r#"
		bucket_count = 128
		if_log_bucket_dist_when_flash = false
		delimiter = "|"
		ratio = 0.5
		"#,
	)
	.unwrap();

	assert_eq!(ctx.len(), 4);
	assert_eq!(ctx.get_size("bucket_count", 0).unwrap(), 128);
	assert!(!ctx.get_bool("if_log_bucket_dist_when_flash", true).unwrap());
	assert_eq!(ctx.get_str("delimiter", ",").unwrap(), "|");
	assert_eq!(ctx.get("ratio"), Some(&OptionValue::Float(0.5)));
}

#[test]
fn test_malformed_toml_is_rejected() {
	let err = ConstructionContext::from_toml_str("bucket_count = ").unwrap_err();
	assert!(matches!(err, ContextError::Parse(_)));
}

#[test]
fn test_negative_size_is_invalid_argument() {
	let ctx = ConstructionContext::new().with_option("reserved_size", -1i64);
	let err = ctx.get_size("reserved_size", 0).unwrap_err();
	assert!(matches!(err, FactoryError::InvalidArgument(_)), "got {err:?}");
}

#[cfg(target_pointer_width = "32")]
#[test]
fn test_size_beyond_platform_width_is_invalid_argument() {
	let ctx = ConstructionContext::new().with_option("bucket_count", i64::MAX);
	assert!(ctx.get_size("bucket_count", 0).is_err());
}

#[test]
fn test_i32_range_is_enforced() {
	let ctx = ConstructionContext::new().with_option("height", i64::from(i32::MAX) + 1);
	assert!(matches!(ctx.get_i32("height", 4), Err(FactoryError::InvalidArgument(_))));
}

#[test]
fn test_wrong_type_is_invalid_argument() {
	let ctx = ConstructionContext::new().with_option("lookahead", "four");
	let err = ctx.get_size("lookahead", 0).unwrap_err();
	assert_eq!(err, FactoryError::InvalidArgument("lookahead: expected integer, found string".into()));
}

#[test]
fn test_set_replaces_previous_value() {
	let mut ctx = ConstructionContext::new();
	ctx.set("height", 4i32);
	ctx.set("height", 12i32);
	assert_eq!(ctx.get_i32("height", 0).unwrap(), 12);
	assert_eq!(ctx.len(), 1);
}
