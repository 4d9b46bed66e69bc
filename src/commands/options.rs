//! Small helpers for reading resolved option values out of an
//! interaction's option list.

use serenity::model::application::CommandDataOption;
use serenity::model::id::UserId;

pub fn str_option<'a>(options: &'a [CommandDataOption], name: &str) -> Option<&'a str> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_str())
}

pub fn int_option(options: &[CommandDataOption], name: &str) -> Option<i64> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_i64())
}

pub fn bool_option(options: &[CommandDataOption], name: &str) -> Option<bool> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_bool())
}

pub fn user_option(options: &[CommandDataOption], name: &str) -> Option<UserId> {
    options
        .iter()
        .find(|option| option.name == name)
        .and_then(|option| option.value.as_user_id())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_typed_values_by_name() {
        let options: Vec<CommandDataOption> = serde_json::from_value(json!([
            {"name": "user", "type": 6, "value": "170915625722576896"},
            {"name": "time", "type": 4, "value": 30},
            {"name": "purge", "type": 5, "value": true},
            {"name": "reason", "type": 3, "value": "spam"}
        ]))
        .expect("raw options should parse");

        assert_eq!(user_option(&options, "user"), Some(UserId::new(170915625722576896)));
        assert_eq!(int_option(&options, "time"), Some(30));
        assert_eq!(bool_option(&options, "purge"), Some(true));
        assert_eq!(str_option(&options, "reason"), Some("spam"));
        assert_eq!(str_option(&options, "missing"), None);
    }
}
