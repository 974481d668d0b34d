/// DashScope configuration loaded from environment variables.
///
/// The API key is optional at startup: the server boots and serves
/// everything else without it, and each AI route reports a configuration
/// error when called.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// Bearer key for DashScope. `None` when `DASHSCOPE_API_KEY` is unset.
    pub api_key: Option<String>,
    /// Chat model name (default: `qwen-turbo`).
    pub model: String,
    /// Base URL of the OpenAI-compatible endpoint.
    pub chat_base_url: String,
    /// Full URL of the speech synthesis endpoint.
    pub tts_url: String,
}

impl AiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var              | Default                                               |
    /// |----------------------|-------------------------------------------------------|
    /// | `DASHSCOPE_API_KEY`  | unset (AI routes answer with a configuration error)   |
    /// | `QWEN_MODEL`         | `qwen-turbo`                                          |
    /// | `DASHSCOPE_BASE_URL` | `https://dashscope.aliyuncs.com/compatible-mode/v1`   |
    /// | `DASHSCOPE_TTS_URL`  | `https://dashscope.aliyuncs.com/api/v1/services/audio/tts` |
    pub fn from_env() -> Self {
        let api_key = std::env::var("DASHSCOPE_API_KEY")
            .ok()
            .filter(|k| !k.is_empty());

        let model = std::env::var("QWEN_MODEL").unwrap_or_else(|_| "qwen-turbo".into());

        let chat_base_url = std::env::var("DASHSCOPE_BASE_URL")
            .unwrap_or_else(|_| "https://dashscope.aliyuncs.com/compatible-mode/v1".into());

        let tts_url = std::env::var("DASHSCOPE_TTS_URL")
            .unwrap_or_else(|_| "https://dashscope.aliyuncs.com/api/v1/services/audio/tts".into());

        Self {
            api_key,
            model,
            chat_base_url,
            tts_url,
        }
    }
}
