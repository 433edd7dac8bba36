use crate::session::RetryPolicy;
use std::str::FromStr;
use std::time::Duration;
use zap_client::ClientConfig;

/// 引擎配置 - 报价与下单引擎的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | PARCEL_API_URL | http://localhost:5000 | Parcel API 地址 |
/// | REQUEST_TIMEOUT_MS | 15000 | 请求超时(毫秒) |
/// | SUBMIT_MAX_RETRIES | 3 | 首次提交之后的最大重试次数 |
/// | RETRY_BASE_DELAY_MS | 500 | 首次退避延迟(毫秒) |
/// | RETRY_MAX_DELAY_MS | 8000 | 退避延迟上限(毫秒) |
/// | PROPOSE_TRACKING_ID | true | 是否提交客户端候选运单号 |
/// | REGION_TABLE_PATH | (未设置) | 区域表 JSON 文件，未设置时使用内置表 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (未设置) | 按天滚动的日志目录 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// PARCEL_API_URL=https://api.zap.example SUBMIT_MAX_RETRIES=5 zap-quote book draft.json
/// ```
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Parcel API 基础地址
    pub parcel_api_url: String,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,

    // === 提交重试 ===
    /// 首次提交之后允许的重试次数
    pub submit_max_retries: u32,
    /// 首次退避延迟 (毫秒)，之后每次翻倍
    pub retry_base_delay_ms: u64,
    /// 退避延迟上限 (毫秒)
    pub retry_max_delay_ms: u64,

    /// 是否随下单请求提交 `ZAP-######` 候选运单号
    pub propose_tracking_id: bool,
    /// 区域表文件路径
    pub region_table_path: Option<String>,

    // === 日志 ===
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,

    /// 运行环境: development | staging | production
    pub environment: String,
}

impl EngineConfig {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置或无法解析，使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载配置 (测试中使用 HashMap)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            parcel_api_url: non_empty(&lookup, "PARCEL_API_URL")
                .unwrap_or_else(|| "http://localhost:5000".into()),
            request_timeout_ms: parse_var(&lookup, "REQUEST_TIMEOUT_MS").unwrap_or(15_000),
            submit_max_retries: parse_var(&lookup, "SUBMIT_MAX_RETRIES").unwrap_or(3),
            retry_base_delay_ms: parse_var(&lookup, "RETRY_BASE_DELAY_MS").unwrap_or(500),
            retry_max_delay_ms: parse_var(&lookup, "RETRY_MAX_DELAY_MS").unwrap_or(8_000),
            propose_tracking_id: parse_var(&lookup, "PROPOSE_TRACKING_ID").unwrap_or(true),
            region_table_path: non_empty(&lookup, "REGION_TABLE_PATH"),
            log_level: non_empty(&lookup, "LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_json: parse_var(&lookup, "LOG_JSON").unwrap_or(false),
            log_dir: non_empty(&lookup, "LOG_DIR"),
            environment: non_empty(&lookup, "ENVIRONMENT").unwrap_or_else(|| "development".into()),
        }
    }

    /// 提交重试策略
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.submit_max_retries,
            Duration::from_millis(self.retry_base_delay_ms),
            Duration::from_millis(self.retry_max_delay_ms),
        )
    }

    /// Parcel API 客户端配置
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.parcel_api_url.clone()).with_timeout_ms(self.request_timeout_ms)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// 读取并解析变量，缺失或无法解析时返回 None
fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

/// 读取非空字符串变量
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.parcel_api_url, "http://localhost:5000");
        assert_eq!(config.request_timeout_ms, 15_000);
        assert_eq!(config.submit_max_retries, 3);
        assert!(config.propose_tracking_id);
        assert!(config.region_table_path.is_none());
        assert!(config.is_development());

        let retry = config.retry_policy();
        assert_eq!(retry.max_retries, 3);
        assert_eq!(retry.base_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("PARCEL_API_URL", "https://api.zap.test"),
            ("SUBMIT_MAX_RETRIES", "5"),
            ("REQUEST_TIMEOUT_MS", "not-a-number"),
            ("PROPOSE_TRACKING_ID", "false"),
            ("LOG_DIR", "  "),
            ("ENVIRONMENT", "production"),
        ]);
        let config = EngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.parcel_api_url, "https://api.zap.test");
        assert_eq!(config.submit_max_retries, 5);
        assert_eq!(config.request_timeout_ms, 15_000);
        assert!(!config.propose_tracking_id);
        assert!(config.log_dir.is_none());
        assert!(config.is_production());

        let client = config.client_config();
        assert_eq!(client.base_url, "https://api.zap.test");
        assert_eq!(client.timeout_ms, 15_000);
    }
}
