use jni::objects::{JClass, JString};
use jni::sys::{jint, jlong, jstring};
use jni::JNIEnv;
use serde_json::json;
use y2_engine::api::{list_bots, lookup, LookupConfig};
use y2_engine::Dice;

fn ok(env: &JNIEnv, value: serde_json::Value) -> jstring {
    let payload = json!({ "ok": true, "result": value });
    match env.new_string(payload.to_string()) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn err(env: &JNIEnv, e: impl std::fmt::Display) -> jstring {
    let payload = json!({ "ok": false, "error": e.to_string() });
    match env.new_string(payload.to_string()) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

fn respond(env: &JNIEnv, result: Result<serde_json::Value, String>) -> jstring {
    match result {
        Ok(value) => ok(env, value),
        Err(e) => err(env, e),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_y2assist_Ffi_version<'local>(
    env: JNIEnv<'local>,
    _class: JClass<'local>,
) -> jstring {
    match env.new_string(version_internal()) {
        Ok(s) => s.into_raw(),
        Err(_) => std::ptr::null_mut(),
    }
}

#[no_mangle]
pub extern "system" fn Java_com_y2assist_Ffi_listBotsJson(
    env: JNIEnv,
    _class: JClass,
) -> jstring {
    respond(&env, list_bots_internal())
}

#[no_mangle]
pub extern "system" fn Java_com_y2assist_Ffi_lookupJson(
    mut env: JNIEnv,
    _class: JClass,
    json: JString,
) -> jstring {
    let input: String = match env.get_string(&json) {
        Ok(s) => s.into(),
        Err(e) => return err(&env, e),
    };
    respond(&env, lookup_internal(&input))
}

/// 0-based d8 roll; negative seeds draw from entropy.
#[no_mangle]
pub extern "system" fn Java_com_y2assist_Ffi_rollChoice(
    _env: JNIEnv<'_>,
    _class: JClass<'_>,
    seed: jlong,
) -> jint {
    roll_internal(seed) as jint
}

// Internal functions for testing without JNI overhead
pub fn version_internal() -> String {
    format!("y2-ffi {}", env!("CARGO_PKG_VERSION"))
}

pub fn list_bots_internal() -> Result<serde_json::Value, String> {
    let bots = list_bots(None).map_err(|e| format!("{:#}", e))?;
    serde_json::to_value(bots).map_err(|e| e.to_string())
}

pub fn lookup_internal(input: &str) -> Result<serde_json::Value, String> {
    let cfg: LookupConfig =
        serde_json::from_str(input).map_err(|e| format!("invalid_config: {}", e))?;
    let result = lookup(cfg).map_err(|e| format!("{:#}", e))?;
    serde_json::to_value(result).map_err(|e| e.to_string())
}

pub fn roll_internal(seed: i64) -> usize {
    let mut dice = match u64::try_from(seed) {
        Ok(seed) => Dice::from_seed(seed),
        Err(_) => Dice::from_entropy(),
    };
    dice.roll_choice()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_names_the_crate() {
        assert!(version_internal().starts_with("y2-ffi "));
    }

    #[test]
    fn lists_builtin_bots() {
        let v = list_bots_internal().unwrap();
        let bots = v.as_array().unwrap();
        assert_eq!(bots.len(), 10);
        assert_eq!(bots[0]["code"], "glass-monk");
    }

    #[test]
    fn lookup_round_trip() {
        let v = lookup_internal(r#"{ "bot": "colossus", "hand_size": 12, "choice_index": 0 }"#)
            .unwrap();
        assert_eq!(v["choice"]["damage"], 50);
        assert_eq!(v["choice"]["always"], true);
        assert_eq!(v["bracket"], "11-12");
    }

    #[test]
    fn bad_config_is_reported() {
        let e = lookup_internal(r#"{ "hand_size": 7 }"#).unwrap_err();
        assert!(e.starts_with("invalid_config:"));
        let e = lookup_internal(r#"{ "bot": 42 }"#).unwrap_err();
        assert!(e.contains("not found"));
    }

    #[test]
    fn seeded_rolls_repeat() {
        assert_eq!(roll_internal(9), roll_internal(9));
        assert!(roll_internal(-1) < 8);
    }
}
