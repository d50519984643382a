//! Command surface over the library: list models, list strategies, or
//! run a named strategy against the configured providers.

use std::env;
use std::process;

use relayllm::fallback::strategies::{self, DEFAULT_STRATEGY};
use relayllm::{AttemptStatus, FallbackExecutor, FallbackResponse};

const DEFAULT_PROMPT: &str = "Explain quantum computing in simple terms.";

#[tokio::main]
async fn main() {
    relayllm::use_logging();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("models") => list_models(),
        Some("strategies") => list_strategies(),
        Some("run") => {
            let strategy_name = args.get(1).map(String::as_str).unwrap_or(DEFAULT_STRATEGY);
            let prompt = if args.len() > 2 {
                args[2..].join(" ")
            } else {
                DEFAULT_PROMPT.to_string()
            };
            run_strategy(strategy_name, &prompt).await;
        }
        Some(other) => {
            eprintln!("Unknown option: {}", other);
            eprintln!("Usage: relayllm [models | strategies | run [strategy] [prompt...]]");
            process::exit(1);
        }
        None => run_strategy(DEFAULT_STRATEGY, DEFAULT_PROMPT).await,
    }
}

fn list_models() {
    let executor = FallbackExecutor::with_defaults();
    println!("Available models:");
    for key in executor.registry().keys() {
        // keys() only returns registered keys, resolve cannot miss here
        if let Some(entry) = executor.registry().resolve(key) {
            println!("  {:<24} {} ({})", key, entry.display_name, entry.provider);
        }
    }
}

fn list_strategies() {
    println!("Available strategies:");
    for strategy in strategies::strategies() {
        println!("  {:<16} {:?}", strategy.name, strategy.models);
    }
}

async fn run_strategy(name: &str, prompt: &str) {
    let strategy = match strategies::strategy(name) {
        Some(strategy) => strategy,
        None => {
            eprintln!("Unknown strategy: {}", name);
            eprintln!(
                "Available strategies: {}",
                strategies::strategies()
                    .iter()
                    .map(|s| s.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            process::exit(1);
        }
    };

    let request = match strategy.request(prompt) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Invalid request: {}", e);
            process::exit(1);
        }
    };

    println!("Using {} strategy: {:?}\n", strategy.name, strategy.models);

    let executor = FallbackExecutor::with_defaults();
    let response = executor.process(&request).await;
    print_response(&response);

    if !response.success {
        process::exit(1);
    }
}

fn print_response(response: &FallbackResponse) {
    println!("Results:");
    println!("  Success: {}", response.success);

    if response.success {
        if let Some(model) = &response.model_used {
            println!("  Model used: {}", model);
        }
        if let Some(cost) = response.cost {
            println!("  Cost: ${:.4}", cost);
        }
        if let Some(usage) = &response.usage {
            println!(
                "  Usage: {} prompt + {} completion = {} tokens",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        println!("\nResponse:");
        println!("{}", response.content.as_deref().unwrap_or(""));
    } else if let Some(error) = &response.error {
        println!("  Error: {}", error);
    }

    if !response.attempts.is_empty() {
        println!("\nAttempt history:");
        for (i, attempt) in response.attempts.iter().enumerate() {
            let status = match attempt.status {
                AttemptStatus::Success => "ok",
                AttemptStatus::Failure => "failed",
            };
            println!("  {}. {} [{}] ({}ms)", i + 1, attempt.name, status, attempt.latency_ms);
            if let Some(error) = &attempt.error {
                println!("     {}", error);
            }
        }
    }
}
