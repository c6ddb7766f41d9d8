use std::env;

/// 读取字符串环境变量，未设置或为空时返回默认值
pub fn env_or_default(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
