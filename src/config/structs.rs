use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumMessage, EnumString};

use crate::errors::{CommonsError, Result};
use crate::properties::ActiveProfiles;

/// 默认配置文件名
pub const CONFIG_FILE: &str = "commons.toml";

/// 环境变量前缀，分隔符为 `__`
pub const ENV_PREFIX: &str = "COMMONS";

/// 日志输出格式预设
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumMessage,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogPattern {
    #[strum(message = "level and message")]
    Limited,
    #[default]
    #[strum(message = "timestamp, level and message")]
    Basic,
    #[strum(message = "timestamp, level, thread, target, file:line and message")]
    Extended,
}

/// 库配置（从 TOML 加载，环境变量覆盖）
///
/// - logging: 日志配置
/// - properties: 属性文件加载配置
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CommonsConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub properties: PropertiesConfig,
}

impl CommonsConfig {
    /// 从 `commons.toml` 和环境变量加载配置
    ///
    /// 优先级：ENV > commons.toml > 默认值。失败时回退到默认值。
    pub fn load() -> Self {
        match Self::load_from(CONFIG_FILE) {
            Ok(config) => config,
            Err(e) => {
                // 此时日志系统尚未初始化
                eprintln!("[ERROR] {}", e.format_simple());
                Self::default()
            }
        }
    }

    /// 从指定文件（可选）和环境变量加载配置
    ///
    /// ENV 前缀：COMMONS，分隔符：__
    /// 示例：COMMONS__LOGGING__LEVEL=debug
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        use config::{Config, Environment, File};

        let path = path.as_ref();
        let settings = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::from(path).required(false))
            // 2. 从环境变量覆盖
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("properties.profiles"),
            )
            .build()?;

        let config: CommonsConfig = settings.try_deserialize()?;
        if path.exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path.display());
        }
        Ok(config)
    }

    /// 生成示例 TOML 配置文件
    pub fn generate_sample_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|e| format!("Error generating sample config: {}", e))
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// EnvFilter 指令，如 `info` 或 `commons=debug,warn`
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` 或 `json`
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub pattern: LogPattern,
    /// 未设置时输出到控制台
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    /// Log file path, treating an empty string as unset.
    pub fn log_file(&self) -> Option<&str> {
        self.file.as_deref().filter(|f| !f.is_empty())
    }
}

/// 属性文件加载配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertiesConfig {
    /// 候选文件基础名，如 `application`
    #[serde(default = "default_base_name")]
    pub base_name: String,
    /// 内部（随程序打包）资源目录
    #[serde(default = "default_internal_dir")]
    pub internal_dir: PathBuf,
    /// 外部（部署）目录
    #[serde(default = "default_external_dir")]
    pub external_dir: PathBuf,
    /// 激活的 profile，按顺序合并
    #[serde(default)]
    pub profiles: Vec<String>,
}

impl PropertiesConfig {
    pub fn active_profiles(&self) -> ActiveProfiles {
        self.profiles.iter().collect()
    }

    /// Rejects settings that cannot produce any candidate file.
    pub fn validate(&self) -> Result<()> {
        if self.base_name.trim().is_empty() {
            return Err(CommonsError::validation("properties.base_name must not be empty"));
        }
        if self.base_name.contains(['/', '\\']) {
            return Err(CommonsError::validation(format!(
                "properties.base_name must be a file stem, got '{}'",
                self.base_name
            )));
        }
        Ok(())
    }
}

// ============================================================
// Default value functions
// ============================================================

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

fn default_base_name() -> String {
    "application".to_string()
}

fn default_internal_dir() -> PathBuf {
    PathBuf::from("resources")
}

fn default_external_dir() -> PathBuf {
    PathBuf::from(".")
}

// ============================================================
// Default implementations
// ============================================================

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            pattern: LogPattern::default(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}

impl Default for PropertiesConfig {
    fn default() -> Self {
        Self {
            base_name: default_base_name(),
            internal_dir: default_internal_dir(),
            external_dir: default_external_dir(),
            profiles: Vec::new(),
        }
    }
}
