//! LLM 服务 - 业务能力层
//!
//! 只负责"生成章节摘要"能力，不关心流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 支持自定义 API 端点和模型
//! - 兼容 OpenAI API 的服务（如 Azure, Gemini, Ollama 的 OpenAI 兼容端点等）

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{ConfigError, SummarizeError};
use crate::models::Chapter;
use crate::services::Summarizer;

const SYSTEM_MESSAGE: &str = "You are a careful editor. Summarize book chapters faithfully and concisely.";

/// LLM 服务
///
/// 职责：
/// - 调用 LLM API 生成单章摘要
/// - 只处理单个章节
/// - 不出现 Vec<Chapter>
/// - 不关心并发和排序
pub struct LlmService {
    client: Client<OpenAIConfig>,
    model_name: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlmService {
    /// 创建新的 LLM 服务
    ///
    /// 没有 API Key 时直接拒绝，程序不应继续运行
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let api_key = config
            .llm_api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingCredential)?;

        let openai_config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(&config.llm_api_base_url);

        Ok(Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
            max_tokens: config.llm_max_tokens,
            temperature: config.llm_temperature,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 通用的 LLM 调用函数
    ///
    /// # 参数
    /// - `user_message`: 用户消息内容
    /// - `system_message`: 系统消息（可选）
    ///
    /// # 返回
    /// 返回去掉首尾空白的响应内容
    pub async fn send_to_llm(
        &self,
        user_message: &str,
        system_message: Option<&str>,
    ) -> Result<String, SummarizeError> {
        debug!("调用 LLM API，模型: {}", self.model_name);
        debug!("用户消息长度: {} 字符", user_message.len());

        let mut messages = Vec::new();

        if let Some(sys_msg) = system_message {
            let system_msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(sys_msg)
                .build()
                .map_err(|e| SummarizeError::Fatal(format!("构建系统消息失败: {}", e)))?;
            messages.push(ChatCompletionRequestMessage::System(system_msg));
        }

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(user_message)
            .build()
            .map_err(|e| SummarizeError::Fatal(format!("构建用户消息失败: {}", e)))?;
        messages.push(ChatCompletionRequestMessage::User(user_msg));

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| SummarizeError::Fatal(format!("构建请求失败: {}", e)))?;

        // 不区分临时性错误和致命错误，调用方也不会重试
        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            SummarizeError::Transient(e.to_string())
        })?;

        debug!("LLM API 调用成功");

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| SummarizeError::Fatal("LLM 返回内容为空".to_string()))?;

        Ok(content.trim().to_string())
    }
}

impl Summarizer for LlmService {
    async fn summarize(&self, chapter: &Chapter) -> Result<String, SummarizeError> {
        let prompt = build_summary_prompt(chapter);
        let summary = self.send_to_llm(&prompt, Some(SYSTEM_MESSAGE)).await?;

        if summary.is_empty() {
            return Err(SummarizeError::Fatal("LLM 返回内容为空".to_string()));
        }

        Ok(format_summary(chapter.number, &summary))
    }
}

/// 构建单章摘要提示词
fn build_summary_prompt(chapter: &Chapter) -> String {
    format!(
        "Summarize this chapter with title {} and brief {} and content {}",
        chapter.title, chapter.quick_brief, chapter.body
    )
}

/// 给摘要加上章节标题行
///
/// 输出中章节之间以空行分隔，所以单章内容不能出现空行
fn format_summary(number: u64, summary: &str) -> String {
    let body = summary
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");
    format!("------ Summary of Chapter {}:\n{}", number, body.trim_start())
}
