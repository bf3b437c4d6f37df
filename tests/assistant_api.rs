//! Live tests against the generative-language API.

// Only runs with `--features integration_test`, and skips without credentials.
#![cfg(feature = "integration_test")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use wrapdeck::assistant::gemini::GeminiAssistant;
use wrapdeck::assistant::{extract_svg_blocks, Assistant, AssistantRequest, Conversation};
use wrapdeck::config::Config;
use wrapdeck::presets;

fn setup_assistant() -> Option<GeminiAssistant> {
    match Config::load() {
        Ok(config) if config.has_assistant_credentials() => Some(GeminiAssistant::new(&config)),
        Ok(_) => {
            println!(r#"Skipping integration test: GEMINI_API_KEY not found in environment/".env" file."#);
            None
        }
        Err(e) => {
            println!("Skipping integration test: Failed to load config: {e}");
            None
        }
    }
}

#[tokio::test]
async fn test_layout_question_gets_a_reply() {
    if let Some(assistant) = setup_assistant() {
        let slide = presets::new_slide();
        let request = AssistantRequest::for_slide(&slide, "How should I lay out these elements?");
        let reply = assistant.suggest(&request).await;
        match reply {
            Ok(text) => assert!(!text.trim().is_empty(), "Expected a non-empty reply"),
            Err(e) => panic!("suggest failed: {e}"),
        }
    }
}

#[tokio::test]
async fn test_svg_request_yields_markup() {
    if let Some(assistant) = setup_assistant() {
        let slide = presets::new_slide();
        let request = AssistantRequest::for_slide(&slide, "Give me an SVG of a simple five-point star");
        let mut conversation = Conversation::new();
        conversation.push_user(&request.message);
        let reply = conversation.record_reply(assistant.suggest(&request).await);
        println!("Reply: {}", reply.content);
        assert!(!extract_svg_blocks(&reply.content).is_empty(), "Expected at least one SVG block");
    }
}
