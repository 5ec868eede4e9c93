//! Built-in vendor table.

use serde_json::json;

use super::{AuthStyle, ListingProbe, ListingShape, ProbeStrategy, SyntheticProbe, VendorProfile};

/// Pseudo-vendor whose model name is always typed by hand.
pub const CUSTOM_VENDOR: &str = "自定义";

const ANTHROPIC_VERSION: &str = "2023-06-01";
const ANTHROPIC_PROBE_MODEL: &str = "claude-3-haiku-20240307";

/// Model families kept from OpenAI-style listings (OpenAI and Azure).
const OPENAI_FAMILIES: &[&str] = &["gpt", "davinci", "embedding", "dall-e", "whisper", "tts"];

fn bearer_data_ids() -> ListingProbe {
    ListingProbe::new("/models", AuthStyle::Bearer, ListingShape::DataIds)
}

pub(super) fn profiles() -> Vec<VendorProfile> {
    vec![
        VendorProfile::new(
            "OpenAI",
            "https://api.openai.com/v1",
            &[
                "gpt-4",
                "gpt-4-turbo",
                "gpt-4o",
                "gpt-4o-mini",
                "gpt-3.5-turbo",
                "text-embedding-ada-002",
                "dall-e-3",
            ],
            ProbeStrategy::Listing(bearer_data_ids().allow(OPENAI_FAMILIES)),
        ),
        VendorProfile::new(
            "Google",
            "https://generativelanguage.googleapis.com/v1beta",
            &[
                "gemini-1.5-pro",
                "gemini-1.5-flash",
                "gemini-pro",
                "gemini-pro-vision",
                "palm-2",
                "text-bison",
                "chat-bison",
                "embedding-gecko",
            ],
            ProbeStrategy::Listing(
                ListingProbe::new(
                    "/models",
                    AuthStyle::QueryParam("key".to_string()),
                    ListingShape::ModelNames {
                        strip_prefix: Some("models/".to_string()),
                    },
                )
                // Google answers 400 for a malformed or unknown key.
                .unauthorized_on(&[400]),
            ),
        ),
        VendorProfile::new(
            "Anthropic",
            "https://api.anthropic.com/v1",
            &[
                "claude-3-opus-20240229",
                "claude-3-sonnet-20240229",
                "claude-3-haiku-20240307",
                "claude-2.1",
                "claude-2.0",
                "claude-instant-1.2",
            ],
            ProbeStrategy::Synthetic(
                SyntheticProbe::new(
                    "/messages",
                    AuthStyle::Header("x-api-key".to_string()),
                    json!({
                        "model": ANTHROPIC_PROBE_MODEL,
                        "max_tokens": 1,
                        "messages": [{"role": "user", "content": "test"}]
                    }),
                )
                .header("anthropic-version", ANTHROPIC_VERSION)
                // 400 means the key authenticated but the request was rejected.
                .accept(&[200, 400]),
            ),
        ),
        VendorProfile::new(
            "Cohere",
            "https://api.cohere.ai/v1",
            &[
                "command",
                "command-r",
                "command-r-plus",
                "command-light",
                "embed-english",
                "embed-multilingual",
            ],
            ProbeStrategy::Listing(ListingProbe::new(
                "/models",
                AuthStyle::Bearer,
                ListingShape::ModelNames { strip_prefix: None },
            )),
        ),
        VendorProfile::new(
            "Groq",
            "https://api.groq.com/openai/v1",
            &[
                "llama3-8b-8192",
                "llama3-70b-8192",
                "mixtral-8x7b-32768",
                "gemma-7b-it",
            ],
            ProbeStrategy::Listing(bearer_data_ids()),
        ),
        VendorProfile::new(
            "DeepSeek",
            "https://api.deepseek.com/v1",
            &[
                "deepseek-chat",
                "deepseek-coder",
                "deepseek-math",
                "deepseek-v2",
                "deepseek-v2-chat",
            ],
            ProbeStrategy::Listing(bearer_data_ids()),
        ),
        VendorProfile::new(
            "Moonshot",
            "https://api.moonshot.cn/v1",
            &["moonshot-v1-8k", "moonshot-v1-32k", "moonshot-v1-128k"],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(
            "智谱AI",
            "https://open.bigmodel.cn/api/paas/v4",
            &["glm-4", "glm-4v", "glm-3-turbo", "chatglm3-6b", "chatglm2-6b"],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(
            "百度文心",
            "https://aip.baidubce.com/rpc/2.0/ai_custom/v1",
            &[
                "ernie-bot-4.0",
                "ernie-bot-turbo",
                "ernie-bot",
                "ernie-speed",
                "ernie-lite",
            ],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(
            "阿里通义",
            "https://dashscope.aliyuncs.com/api/v1",
            &[
                "qwen-turbo",
                "qwen-plus",
                "qwen-max",
                "qwen-max-longcontext",
                "qwen-vl-plus",
            ],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(
            "字节豆包",
            "https://ark.cn-beijing.volces.com/api/v3",
            &[
                "doubao-lite-4k",
                "doubao-pro-4k",
                "doubao-pro-32k",
                "doubao-pro-128k",
            ],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(
            "腾讯混元",
            "https://hunyuan.tencentcloudapi.com",
            &["hunyuan-lite", "hunyuan-standard", "hunyuan-pro"],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(
            "讯飞星火",
            "https://spark-api.xf-yun.com/v1.1",
            &["spark-v3.5", "spark-v3.0", "spark-v2.0", "spark-lite"],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(
            "Microsoft Azure",
            "https://your-resource.openai.azure.com",
            &[
                "gpt-4",
                "gpt-4-turbo",
                "gpt-35-turbo",
                "gpt-35-turbo-16k",
                "text-embedding-ada-002",
            ],
            ProbeStrategy::Listing(
                bearer_data_ids()
                    .allow(OPENAI_FAMILIES)
                    .requires_endpoint(),
            ),
        ),
        VendorProfile::new(
            "Hugging Face",
            "https://api-inference.huggingface.co/models",
            &[
                "llama-2-7b",
                "llama-2-13b",
                "llama-2-70b",
                "mistral-7b",
                "codellama",
            ],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(
            "Perplexity",
            "https://api.perplexity.ai",
            &[
                "llama-3-sonar-small-32k-chat",
                "llama-3-sonar-large-32k-chat",
                "mixtral-8x7b-instruct",
            ],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(
            "Together AI",
            "https://api.together.xyz/v1",
            &[
                "meta-llama/Llama-2-7b-chat-hf",
                "meta-llama/Llama-2-13b-chat-hf",
                "mistralai/Mixtral-8x7B-Instruct-v0.1",
            ],
            ProbeStrategy::StaticOnly,
        ),
        VendorProfile::new(CUSTOM_VENDOR, "", &[], ProbeStrategy::ManualEntry),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_unique_names() {
        let profiles = profiles();
        let mut names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), profiles.len());
    }

    #[test]
    fn anthropic_probe_sends_version_header() {
        let profiles = profiles();
        let anthropic = profiles.iter().find(|p| p.name == "Anthropic").unwrap();
        let ProbeStrategy::Synthetic(probe) = &anthropic.probe else {
            panic!("Anthropic should use a synthetic probe");
        };
        assert!(
            probe
                .headers
                .contains(&("anthropic-version".to_string(), ANTHROPIC_VERSION.to_string()))
        );
        assert_eq!(probe.accepted, vec![200, 400]);
        assert_eq!(probe.body["max_tokens"], 1);
    }

    #[test]
    fn only_custom_vendor_has_empty_endpoint() {
        for profile in profiles() {
            if profile.name == CUSTOM_VENDOR {
                assert!(profile.default_endpoint.is_empty());
            } else {
                assert!(profile.default_endpoint.starts_with("https://"));
            }
        }
    }
}
