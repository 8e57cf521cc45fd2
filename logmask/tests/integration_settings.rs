//! Integration tests for JSON-configured engines.

#![cfg(feature = "json")]

use logmask::{ConfigError, MaskingEngine, MaskingSettings, RuleError};

fn engine_from(json: &str) -> MaskingEngine {
    let config = MaskingSettings::from_json_str(json)
        .unwrap()
        .into_config()
        .unwrap();
    MaskingEngine::new(config)
}

mod configured_engines {
    use super::*;

    #[test]
    fn custom_rule_masks_bodies_and_values() {
        let engine = engine_from(
            r#"{
                "max_body_length": 0,
                "rules": [
                    {"name": "card", "fields": ["card_no"], "type": "partial",
                     "kind": "generic", "keep_prefix": 4, "keep_suffix": 4}
                ]
            }"#,
        );
        assert_eq!(
            engine.mask_body(r#"{"card_no":"4111222233334444","password":"x"}"#),
            r#"{"card_no":"4111********4444","password":"***MASKED***"}"#
        );
        assert_eq!(engine.mask_value("CARD_NO", "4111222233334444"), "4111********4444");
    }

    #[test]
    fn disabled_settings_produce_identity_engine() {
        let engine = engine_from(r#"{"enabled": false}"#);
        assert_eq!(engine.mask_body("password=secret"), "password=secret");
    }

    #[test]
    fn custom_body_limit() {
        let engine = engine_from(r#"{"max_body_length": 8}"#);
        assert_eq!(
            engine.mask_body("token=abcdef"),
            "token=**... (truncated)"
        );
    }

    #[test]
    fn email_kind_from_settings() {
        let engine = engine_from(
            r#"{
                "include_defaults": false,
                "rules": [
                    {"name": "contact", "fields": ["contact"], "type": "partial",
                     "kind": "email", "keep_prefix": 1, "keep_suffix": 1}
                ]
            }"#,
        );
        assert_eq!(
            engine.mask_body("contact=alice@example.com&email=bob@example.com"),
            "contact=a***e@example.com&email=bob@example.com"
        );
    }
}

mod structured_settings {
    use serde_json::json;

    use super::*;

    #[test]
    fn settings_from_a_json_value() {
        let settings: MaskingSettings = serde_json::from_value(json!({
            "max_body_length": -1,
            "rules": [
                {"name": "session", "fields": ["sid"], "type": "partial",
                 "kind": "token", "keep_prefix": 2}
            ]
        }))
        .unwrap();
        assert_eq!(settings.max_body_length, 0);

        let engine = MaskingEngine::new(settings.into_config().unwrap());
        assert_eq!(
            engine.mask_body("sid=abcdef&password=p"),
            "sid=***MASKED***&password=***MASKED***"
        );
    }

    #[test]
    fn settings_serialize_with_wire_names() {
        let value = serde_json::to_value(MaskingSettings::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "enabled": true,
                "max_body_length": 1000,
                "include_defaults": true,
                "rules": []
            })
        );
    }
}

mod invalid_settings {
    use super::*;

    #[test]
    fn rule_without_name_is_rejected() {
        let result = MaskingSettings::from_json_str(r#"{"rules": [{"name": "", "fields": ["a"]}]}"#)
            .unwrap()
            .into_config();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRule {
                index: 0,
                source: RuleError::EmptyName,
                ..
            })
        ));
    }

    #[test]
    fn unknown_rule_type_is_a_parse_error() {
        let result = MaskingSettings::from_json_str(
            r#"{"rules": [{"name": "x", "fields": ["a"], "type": "sometimes"}]}"#,
        );
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn errors_render_readable_messages() {
        let err = MaskingSettings::from_json_str(r#"{"rules": [{"name": "lonely"}]}"#)
            .unwrap()
            .into_config()
            .unwrap_err();
        assert!(err.to_string().contains("lonely"));
    }
}
