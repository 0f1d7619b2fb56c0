//! Conversion between unified types and Hugging Face types

use super::types::{HuggingFaceMessage, HuggingFaceRequest};
use crate::types::{GenerateRequest, Message, Role};

/// Convert unified request to a Hugging Face chat-completion body
pub fn to_huggingface_request(req: &GenerateRequest, stream: bool) -> HuggingFaceRequest {
    HuggingFaceRequest {
        model: req.model.clone(),
        messages: req.messages.iter().map(to_huggingface_message).collect(),
        max_tokens: req.options.max_tokens,
        temperature: req.options.temperature,
        top_p: req.options.top_p,
        stop: req.options.stop_sequences.clone(),
        stream,
    }
}

fn to_huggingface_message(msg: &Message) -> HuggingFaceMessage {
    let role = match msg.role {
        Role::System => "system",
        Role::User => "user",
        Role::Assistant => "assistant",
    };

    HuggingFaceMessage {
        role: role.to_string(),
        content: msg.content.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let req = GenerateRequest::new(
            "Qwen/Qwen2.5-72B-Instruct",
            vec![Message::system("tutor"), Message::user("Hello")],
        )
        .with_max_tokens(512)
        .with_temperature(0.5)
        .with_top_p(0.25);

        let body = serde_json::to_value(to_huggingface_request(&req, true)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "Qwen/Qwen2.5-72B-Instruct",
                "messages": [
                    {"role": "system", "content": "tutor"},
                    {"role": "user", "content": "Hello"}
                ],
                "max_tokens": 512,
                "temperature": 0.5,
                "top_p": 0.25,
                "stream": true
            })
        );
    }

    #[test]
    fn test_unset_options_are_omitted() {
        let req = GenerateRequest::new("m", vec![Message::assistant("a")]);
        let body = serde_json::to_value(to_huggingface_request(&req, false)).unwrap();

        assert_eq!(body["stream"], json!(false));
        assert!(body.get("max_tokens").is_none());
        assert!(body.get("temperature").is_none());
        assert!(body.get("stop").is_none());
        assert_eq!(body["messages"][0]["role"], "assistant");
    }
}
