use serde::{Deserialize, Deserializer};

/// Snowflake ID 反序列化函数（服务器返回字符串，备份文件里是整数，两种都支持）
pub fn deserialize_snowflake<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Snowflake {
        Int(u64),
        Str(String),
    }

    match Snowflake::deserialize(deserializer)? {
        Snowflake::Int(id) => Ok(id),
        Snowflake::Str(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|e| serde::de::Error::custom(format!("无效的 ID {:?}: {}", s, e))),
    }
}

/// 可空字符串反序列化函数（null 或缺失时返回 None，空串也视为 None）
pub fn deserialize_string_or_null<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()))
}

/// 可空整数反序列化函数（null 或缺失时返回 0）
pub fn deserialize_u64_or_null<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<u64> = Option::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_snowflake")]
        id: u64,
        #[serde(default, deserialize_with = "deserialize_string_or_null")]
        nickname: Option<String>,
        #[serde(default, deserialize_with = "deserialize_u64_or_null")]
        flags: u64,
    }

    #[test]
    fn snowflake_accepts_string_and_integer() {
        let a: Holder = serde_json::from_str(r#"{"id":"80351110224678912"}"#).unwrap();
        let b: Holder = serde_json::from_str(r#"{"id":80351110224678912}"#).unwrap();
        assert_eq!(a.id, 80351110224678912);
        assert_eq!(a.id, b.id);
    }

    #[test]
    fn snowflake_rejects_garbage() {
        assert!(serde_json::from_str::<Holder>(r#"{"id":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Holder>(r#"{"id":null}"#).is_err());
    }

    #[test]
    fn nullable_string_collapses_null_and_empty() {
        let h: Holder = serde_json::from_str(r#"{"id":1,"nickname":null}"#).unwrap();
        assert_eq!(h.nickname, None);
        let h: Holder = serde_json::from_str(r#"{"id":1,"nickname":""}"#).unwrap();
        assert_eq!(h.nickname, None);
        let h: Holder = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(h.nickname, None);
        let h: Holder = serde_json::from_str(r#"{"id":1,"nickname":"bff"}"#).unwrap();
        assert_eq!(h.nickname.as_deref(), Some("bff"));
    }

    #[test]
    fn nullable_integer_defaults_to_zero() {
        let h: Holder = serde_json::from_str(r#"{"id":1,"flags":null}"#).unwrap();
        assert_eq!(h.flags, 0);
        let h: Holder = serde_json::from_str(r#"{"id":1}"#).unwrap();
        assert_eq!(h.flags, 0);
        let h: Holder = serde_json::from_str(r#"{"id":1,"flags":64}"#).unwrap();
        assert_eq!(h.flags, 64);
    }
}
