use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use kisan_mitra::chat::{self, ChatSession};
use kisan_mitra::cli::{Cli, Commands};
use kisan_mitra::config::Config;
use kisan_mitra::context::AppContext;
use kisan_mitra::preferences::PreferenceStore;
use kisan_mitra::report::{self, ReportViewController, SwitchOutcome};
use kisan_mitra::{diagnose, display, logging, tips};
use kisan_mitra_common::{filter_tips_by_category, health_summary, voice_summary};
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let mut config = Config::load().context("failed to load config")?;
    let preferences = PreferenceStore::open(PreferenceStore::default_path()?);

    match cli.command {
        Commands::Config {
            set_api_key,
            set_app_id,
            show,
        } => {
            if let Some(key) = set_api_key {
                config.set_api_key(key)?;
                println!("✔ API key saved");
            }
            if let Some(app_id) = set_app_id {
                config.set_app_id(app_id)?;
                println!("✔ App id saved");
            }
            if show {
                println!("Config: {}", Config::config_path()?.display());
                println!("  App id: {}", config.get_app_id().unwrap_or_else(|_| "(not set)".into()));
                println!("  Base URL: {}", config.base_url);
                println!("  LLM URL: {}", config.llm_url().unwrap_or_else(|_| "(derived)".into()));
                println!("  Timeout: {}s", config.timeout().as_secs());
                println!(
                    "  API key: {}",
                    if config.get_api_key().is_ok() { "set" } else { "not set" }
                );
            }
        }

        Commands::Settings {
            language,
            notifications,
            auto_voice,
            show,
        } => {
            if let Some(language) = language {
                preferences.set_language(language)?;
                println!("✔ Language: {}", language.native_name());
            }
            if let Some(toggle) = notifications {
                preferences.set_notifications(toggle.is_on())?;
                println!("✔ Notifications: {}", on_off(toggle.is_on()));
            }
            if let Some(toggle) = auto_voice {
                preferences.set_auto_voice(toggle.is_on())?;
                println!("✔ Auto voice: {}", on_off(toggle.is_on()));
            }
            if show {
                let prefs = preferences.current();
                println!("Preferences: {}", preferences.path().display());
                println!("  Language: {}", prefs.language.native_name());
                println!("  Notifications: {}", on_off(prefs.notifications_enabled));
                println!("  Auto voice: {}", on_off(prefs.auto_voice));
            }
        }

        Commands::Report { id, lang } => {
            let ctx = AppContext::from_config(&config, preferences)?;
            let mut controller = ReportViewController::new(&ctx.store, &ctx.llm, ctx.deadline);

            let pb = spinner("Loading report...");
            let loaded = controller.load(&id).await;
            pb.finish_and_clear();
            if loaded.is_err() {
                let message = controller.error_message().unwrap_or("Failed to load report.");
                anyhow::bail!("{}", message);
            }

            let target = lang.unwrap_or_else(|| ctx.preferences.language());
            let needs_translation = controller.original().map(|r| r.language) != Some(target);
            let pb = needs_translation.then(|| spinner("Translating..."));
            let outcome = controller.switch_language(target).await;
            if let Some(pb) = pb {
                pb.finish_and_clear();
            }
            match outcome {
                SwitchOutcome::Translated => println!("✔ Translated to {}\n", target.native_name()),
                SwitchOutcome::Failed(reason) => {
                    println!("⚠ Translation failed, showing original ({})\n", reason)
                }
                SwitchOutcome::Reverted | SwitchOutcome::NotLoaded => {}
            }

            if let Some(report) = controller.displayed() {
                println!("{}", display::format_report(report));
                if ctx.preferences.current().auto_voice {
                    println!("🔊 {}", voice_summary(report));
                }
            }
        }

        Commands::Reports => {
            let ctx = AppContext::from_config(&config, preferences)?;
            let pb = spinner("Loading reports...");
            let reports = report::list_reports(&ctx.store, ctx.deadline).await;
            pb.finish_and_clear();
            let reports = reports.context("failed to load reports")?;

            if reports.is_empty() {
                println!("No scan reports yet");
                return Ok(());
            }

            println!("📋 {} reports\n", reports.len());
            print!("{}", display::format_summary(&health_summary(&reports)));
            println!();
            for report in &reports {
                println!("{}", display::format_report_row(report));
            }
        }

        Commands::Tips { category, lang } => {
            let ctx = AppContext::from_config(&config, preferences)?;
            let language = lang.unwrap_or_else(|| ctx.preferences.language());
            let pb = spinner("Loading tips...");
            let all_tips = tips::load_tips(&ctx.store, language, ctx.deadline).await;
            pb.finish_and_clear();
            let all_tips = all_tips.context("failed to load tips")?;

            let shown = filter_tips_by_category(&all_tips, category);
            if shown.is_empty() {
                println!("No tips found");
            }
            for tip in shown {
                println!("{}\n", display::format_tip(tip));
            }
        }

        Commands::Chat { session, messages } => {
            let ctx = AppContext::from_config(&config, preferences)?;
            let language = ctx.preferences.language();
            let mut chat_session = match session {
                Some(id) => ChatSession::resume(&ctx.store, &ctx.llm, id, language, ctx.deadline),
                None => ChatSession::new(&ctx.store, &ctx.llm, language, ctx.deadline),
            };

            if messages.is_empty() {
                chat::run_interactive_chat(&mut chat_session).await?;
                return Ok(());
            }

            chat_session.load_history().await;
            for text in &messages {
                let pb = spinner("Thinking...");
                chat_session.send(text).await;
                pb.finish_and_clear();
            }
            for message in chat_session.messages() {
                println!("{}", chat::format_message(message));
            }
            println!("\n✔ Session: {}", chat_session.session_id());
        }

        Commands::Diagnose { image_url, lang } => {
            let ctx = AppContext::from_config(&config, preferences)?;
            let language = lang.unwrap_or_else(|| ctx.preferences.language());
            let pb = spinner("Analyzing photo...");
            let result =
                diagnose::diagnose(&ctx.store, &ctx.llm, &image_url, language, ctx.deadline).await;
            pb.finish_and_clear();
            let created = result.context("diagnosis failed")?;

            println!("✔ Report saved: {}\n", created.id.as_deref().unwrap_or("-"));
            println!("{}", display::format_report(&created));
        }
    }

    Ok(())
}
