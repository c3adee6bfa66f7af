//! AX-018: Ready-made demo payloads for `/chat`.

use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize)]
pub struct DemoCard {
    pub id: &'static str,
    pub title: &'static str,
    pub endpoint: &'static str,
    pub method: &'static str,
    #[serde(skip_serializing_if = "Value::is_null")]
    pub body: Value,
    pub hint: &'static str,
}

fn chat(id: &'static str, title: &'static str, body: Value, hint: &'static str) -> DemoCard {
    DemoCard {
        id,
        title,
        endpoint: "/chat",
        method: "POST",
        body,
        hint,
    }
}

/// Every demo card, in display order.
pub fn demo_cards() -> Vec<DemoCard> {
    vec![
        chat(
            "chat_timer_python",
            "Futuristic Timer UI (Python)",
            json!({"prompt": "make a futuristic timer ui", "lang": "python"}),
            "Generates app.py; run with: PORT=8000 python app.py",
        ),
        chat(
            "chat_hash_cli",
            "File Hashing CLI (Python)",
            json!({"prompt": "create a CLI tool to hash files"}),
            "Generates hash_files.py; run: python hash_files.py --help",
        ),
        chat(
            "chat_lib_factorial",
            "Factorial Library with Tests (Python)",
            json!({"prompt": "compute the factorial of n"}),
            "Generates a module plus unittest tests",
        ),
        chat(
            "chat_go_service",
            "Fast Microservice Web API (Go)",
            json!({"prompt": "fast microservice web api", "lang": "go"}),
            "Generates main.go; run: PORT=8080 go run .",
        ),
        chat(
            "chat_rust_cli",
            "Memory-Safe CLI Tool (Rust)",
            json!({"prompt": "memory-safe cli tool for file processing", "lang": "rust"}),
            "Generates src/main.rs; build with: cargo build --release",
        ),
        chat(
            "chat_csharp_api",
            "Enterprise Web API (C#)",
            json!({"prompt": "enterprise web api with health", "lang": "csharp"}),
            "Generates a minimal API project; run: PORT=5080 dotnet run",
        ),
        chat(
            "chat_auto_select",
            "Auto Language Selection",
            json!({"prompt": "create a high-performance web service"}),
            "Go is picked for high-performance web keywords",
        ),
        DemoCard {
            id: "healthz",
            title: "Service Health",
            endpoint: "/healthz",
            method: "GET",
            body: Value::Null,
            hint: "Liveness plus component status",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipeline::plan;
    use crate::core::types::Lang;

    #[test]
    fn test_ax018_ids_unique() {
        let cards = demo_cards();
        let mut ids: Vec<_> = cards.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), cards.len());
    }

    #[test]
    fn test_ax018_chat_cards_are_valid_requests() {
        for card in demo_cards().into_iter().filter(|c| c.endpoint == "/chat") {
            let prompt = card.body["prompt"].as_str().unwrap();
            let lang = card.body["lang"].as_str();
            assert!(plan(prompt, lang, None).is_ok(), "{}", card.id);
        }
    }

    #[test]
    fn test_ax018_auto_select_picks_go() {
        let card = demo_cards()
            .into_iter()
            .find(|c| c.id == "chat_auto_select")
            .unwrap();
        let (_, choice) = plan(card.body["prompt"].as_str().unwrap(), None, None).unwrap();
        assert_eq!(choice.lang, Lang::Go);
    }

    #[test]
    fn test_ax018_get_cards_have_no_body() {
        let json = serde_json::to_value(demo_cards()).unwrap();
        let health = json
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == "healthz")
            .unwrap();
        assert!(health.get("body").is_none());
    }
}
