//! Starter snippets shown next to a stored credential.

use crate::registry::{CUSTOM_VENDOR, VendorRegistry};

const OPENAI: &str = r#"import openai

client = openai.OpenAI(
    api_key="YOUR_API_KEY",
    base_url="https://api.openai.com/v1"
)

response = client.chat.completions.create(
    model="gpt-4",
    messages=[
        {"role": "user", "content": "Hello!"}
    ]
)

print(response.choices[0].message.content)
"#;

const GOOGLE: &str = r#"import google.generativeai as genai

genai.configure(api_key="YOUR_API_KEY")
model = genai.GenerativeModel('gemini-1.5-pro')

response = model.generate_content("Hello!")
print(response.text)
"#;

const ANTHROPIC: &str = r#"import anthropic

client = anthropic.Anthropic(
    api_key="YOUR_API_KEY"
)

message = client.messages.create(
    model="claude-3-sonnet-20240229",
    max_tokens=1000,
    messages=[
        {"role": "user", "content": "Hello!"}
    ]
)

print(message.content[0].text)
"#;

const ZHIPU: &str = r#"from zhipuai import ZhipuAI

client = ZhipuAI(api_key="YOUR_API_KEY")

response = client.chat.completions.create(
    model="glm-4",
    messages=[
        {"role": "user", "content": "Hello!"}
    ]
)

print(response.choices[0].message.content)
"#;

const BAIDU: &str = r#"import requests

def call_ernie_api(prompt):
    # exchange the key pair for an access token first
    token_url = "https://aip.baidubce.com/oauth/2.0/token"
    token_params = {
        "grant_type": "client_credentials",
        "client_id": "YOUR_API_KEY",
        "client_secret": "YOUR_SECRET_KEY"
    }

    token_response = requests.post(token_url, params=token_params)
    access_token = token_response.json()["access_token"]

    url = f"https://aip.baidubce.com/rpc/2.0/ai_custom/v1/wenxinworkshop/chat/completions?access_token={access_token}"

    payload = {
        "messages": [{"role": "user", "content": prompt}]
    }

    response = requests.post(url, json=payload)
    return response.json()["result"]

print(call_ernie_api("Hello!"))
"#;

const DEEPSEEK: &str = r#"import openai

client = openai.OpenAI(
    api_key="YOUR_API_KEY",
    base_url="https://api.deepseek.com/v1"
)

response = client.chat.completions.create(
    model="deepseek-chat",
    messages=[
        {"role": "user", "content": "Hello!"}
    ]
)

print(response.choices[0].message.content)
"#;

const CUSTOM: &str = "# Write your custom API call here\n";

/// Example code for a vendor, using the built-in registry for endpoints.
pub fn example_code(vendor: &str) -> String {
    render_example(&VendorRegistry::builtin(), vendor)
}

/// Example code for a vendor.
///
/// Vendors without a dedicated snippet get an OpenAI-compatible client
/// pointed at their default endpoint and first preset model, or
/// placeholders when those are unknown.
pub fn render_example(registry: &VendorRegistry, vendor: &str) -> String {
    let dedicated = match vendor {
        "OpenAI" => Some(OPENAI),
        "Google" => Some(GOOGLE),
        "Anthropic" => Some(ANTHROPIC),
        "智谱AI" => Some(ZHIPU),
        "百度文心" => Some(BAIDU),
        "DeepSeek" => Some(DEEPSEEK),
        CUSTOM_VENDOR => Some(CUSTOM),
        _ => None,
    };
    if let Some(snippet) = dedicated {
        return snippet.to_string();
    }

    let profile = registry.lookup(vendor);
    let base_url = profile
        .map(|p| p.default_endpoint.as_str())
        .filter(|e| !e.is_empty())
        .map(|e| format!("\"{e}\""))
        .unwrap_or_else(|| format!("\"YOUR_API_URL\"  # {vendor} API endpoint"));
    let model = profile
        .and_then(|p| p.preset_models.first())
        .map(|m| format!("\"{m}\""))
        .unwrap_or_else(|| format!("\"YOUR_MODEL\"  # {vendor} model name"));

    format!(
        r#"import openai

client = openai.OpenAI(
    api_key="YOUR_API_KEY",
    base_url={base_url}
)

response = client.chat.completions.create(
    model={model},
    messages=[
        {{"role": "user", "content": "Hello!"}}
    ]
)

print(response.choices[0].message.content)
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedicated_templates() {
        assert!(example_code("Google").contains("genai.configure"));
        assert!(example_code("Anthropic").contains("anthropic.Anthropic"));
        assert!(example_code("百度文心").contains("access_token"));
        assert!(example_code("DeepSeek").contains("https://api.deepseek.com/v1"));
    }

    #[test]
    fn custom_vendor_gets_placeholder_comment() {
        let code = example_code(CUSTOM_VENDOR);
        assert!(code.starts_with('#'));
        assert_eq!(code.lines().count(), 1);
    }

    #[test]
    fn generic_template_uses_registry_defaults() {
        let code = example_code("Moonshot");
        assert!(code.contains(r#"base_url="https://api.moonshot.cn/v1""#));
        assert!(code.contains(r#"model="moonshot-v1-8k""#));
        assert!(code.contains(r#"{"role": "user", "content": "Hello!"}"#));
    }

    #[test]
    fn generic_template_for_unknown_vendor_has_placeholders() {
        let code = example_code("Acme AI");
        assert!(code.contains("YOUR_API_URL"));
        assert!(code.contains("# Acme AI API endpoint"));
        assert!(code.contains("YOUR_MODEL"));
    }
}
