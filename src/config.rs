use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::infrastructure::SlotPool;

/// 未指定 `--config` 时自动读取的配置文件
pub const DEFAULT_CONFIG_FILE: &str = "docsum.toml";

/// 程序配置文件
///
/// 加载顺序：默认值 → TOML 配置文件 → 环境变量 → 命令行参数。
/// 加载完成后作为普通值传入流水线，运行期间不再读取环境变量。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 输入文档路径
    pub input_path: String,
    /// 摘要输出路径
    pub output_path: String,
    /// 文档标题（为空时使用输入文件名）
    pub document_title: Option<String>,
    /// 同时处理的章节数量
    pub max_concurrent_chapters: usize,
    /// 每章摘要完成后的额外等待（毫秒，0 表示关闭）
    pub pacing_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 文档记录存放目录（为空时不保存记录）
    pub store_dir: Option<String>,
    // --- LLM 配置 ---
    pub llm_api_key: Option<String>,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
    pub llm_max_tokens: u32,
    pub llm_temperature: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: "TheArtOfThinkingClearly.txt".to_string(),
            output_path: "bin/TheArtOfThinkingClearly_Summary.txt".to_string(),
            document_title: None,
            max_concurrent_chapters: 5,
            pacing_ms: 0,
            verbose_logging: false,
            store_dir: Some("documents".to_string()),
            llm_api_key: None,
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-3.5-turbo".to_string(),
            llm_max_tokens: 200,
            llm_temperature: 0.3,
        }
    }
}

impl Config {
    /// 加载配置
    ///
    /// 指定了 `config_file` 时文件必须存在；否则仅在当前目录存在 `docsum.toml` 时读取
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match config_file {
            Some(path) => Self::from_toml_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_toml_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };

        base.apply_env()
    }

    /// 从 TOML 文件读取，缺省字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            ConfigError::FileReadFailed {
                path: path.display().to_string(),
                source,
            }
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 用进程环境变量覆盖配置
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_with(|name| std::env::var(name).ok())
    }

    /// 用给定的变量来源覆盖配置（只覆盖已设置的变量）
    pub fn apply_env_with<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("DOCSUM_INPUT") {
            self.input_path = v;
        }
        if let Some(v) = lookup("DOCSUM_OUTPUT") {
            self.output_path = v;
        }
        if let Some(v) = lookup("DOCSUM_TITLE") {
            self.document_title = Some(v);
        }
        if let Some(v) = parse_var(&lookup, "DOCSUM_MAX_CONCURRENT", "usize")? {
            self.max_concurrent_chapters = v;
        }
        if let Some(v) = parse_var(&lookup, "DOCSUM_PACING_MS", "u64")? {
            self.pacing_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "DOCSUM_VERBOSE", "bool")? {
            self.verbose_logging = v;
        }
        if let Some(v) = lookup("DOCSUM_STORE_DIR") {
            self.store_dir = Some(v).filter(|dir| !dir.is_empty());
        }
        // `.env` 里常见 `SECRET_KEY=` 这种空值，不能覆盖其他来源的密钥
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        if let Some(v) = non_empty("SECRET_KEY").or_else(|| non_empty("OPENAI_API_KEY")) {
            self.llm_api_key = Some(v);
        }
        if let Some(v) = lookup("DOCSUM_API_BASE") {
            self.llm_api_base_url = v;
        }
        if let Some(v) = lookup("DOCSUM_MODEL") {
            self.llm_model_name = v;
        }
        if let Some(v) = parse_var(&lookup, "DOCSUM_MAX_TOKENS", "u32")? {
            self.llm_max_tokens = v;
        }

        Ok(self)
    }

    /// 派发前校验：凭证必须存在，并发数必须合法
    pub fn validate(&self) -> Result<(), ConfigError> {
        let has_key = self
            .llm_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty());
        if !has_key {
            return Err(ConfigError::MissingCredential);
        }

        SlotPool::check_capacity(self.max_concurrent_chapters)
    }

    /// 每章的额外等待时间，未开启时为 `None`
    pub fn pacing(&self) -> Option<Duration> {
        (self.pacing_ms > 0).then(|| Duration::from_millis(self.pacing_ms))
    }

    /// 文档标题：优先使用配置，否则取输入文件名（不含扩展名）
    pub fn title(&self) -> String {
        if let Some(title) = self.document_title.as_deref().filter(|t| !t.is_empty()) {
            return title.to_string();
        }

        Path::new(&self.input_path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input_path.clone())
    }
}

fn parse_var<T, F>(lookup: &F, name: &str, expected_type: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::EnvVarParseFailed {
                var_name: name.to_string(),
                value,
                expected_type: expected_type.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_has_no_credential() {
        let config = Config::default();
        assert!(config.llm_api_key.is_none());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingCredential)
        ));
    }

    #[test]
    fn test_apply_env_overrides() {
        let config = Config::default()
            .apply_env_with(lookup_from(&[
                ("DOCSUM_INPUT", "book.txt"),
                ("DOCSUM_MAX_CONCURRENT", "3"),
                ("DOCSUM_PACING_MS", "1000"),
                ("SECRET_KEY", "sk-secret"),
                ("OPENAI_API_KEY", "sk-ignored"),
                ("DOCSUM_STORE_DIR", ""),
            ]))
            .unwrap();

        assert_eq!(config.input_path, "book.txt");
        assert_eq!(config.max_concurrent_chapters, 3);
        assert_eq!(config.pacing(), Some(Duration::from_secs(1)));
        assert_eq!(config.llm_api_key.as_deref(), Some("sk-secret"));
        assert!(config.store_dir.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_key_does_not_hide_other_credentials() {
        let config = Config::default()
            .apply_env_with(lookup_from(&[("SECRET_KEY", ""), ("OPENAI_API_KEY", "sk-openai")]))
            .unwrap();
        assert_eq!(config.llm_api_key.as_deref(), Some("sk-openai"));

        let from_file = Config {
            llm_api_key: Some("sk-from-file".to_string()),
            ..Config::default()
        };
        let config = from_file
            .apply_env_with(lookup_from(&[("SECRET_KEY", "  "), ("OPENAI_API_KEY", "")]))
            .unwrap();
        assert_eq!(config.llm_api_key.as_deref(), Some("sk-from-file"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_env_rejects_bad_number() {
        let err = Config::default()
            .apply_env_with(lookup_from(&[("DOCSUM_MAX_CONCURRENT", "many")]))
            .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::EnvVarParseFailed { ref var_name, .. } if var_name == "DOCSUM_MAX_CONCURRENT"
        ));
    }

    #[test]
    fn test_validate_rejects_zero_concurrency() {
        let config = Config {
            llm_api_key: Some("sk-test".to_string()),
            max_concurrent_chapters: 0,
            ..Config::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidConcurrencyLimit { value: 0, .. })
        ));
    }

    #[test]
    fn test_from_toml_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docsum.toml");
        std::fs::write(
            &path,
            "input_path = \"novel.txt\"\nmax_concurrent_chapters = 8\nllm_model_name = \"gpt-4o-mini\"\n",
        )
        .unwrap();

        let config = Config::from_toml_file(&path).unwrap();
        assert_eq!(config.input_path, "novel.txt");
        assert_eq!(config.max_concurrent_chapters, 8);
        assert_eq!(config.llm_model_name, "gpt-4o-mini");
        assert_eq!(config.llm_max_tokens, 200);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = Config::from_toml_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileReadFailed { .. }));
    }

    #[test]
    fn test_title_falls_back_to_file_stem() {
        let config = Config {
            input_path: "books/TheArtOfThinkingClearly.txt".to_string(),
            ..Config::default()
        };
        assert_eq!(config.title(), "TheArtOfThinkingClearly");

        let config = Config {
            document_title: Some("Custom".to_string()),
            ..config
        };
        assert_eq!(config.title(), "Custom");
    }

    #[test]
    fn test_pacing_disabled_by_default() {
        assert_eq!(Config::default().pacing(), None);
    }
}
