use clap::Parser;
use lowbal::config::{Command, OfferArgs, OutputFormat, ReplyArgs};
use lowbal::utils::error::{ErrorSeverity, NegotiationError};
use lowbal::utils::{logger, validation::Validate};
use lowbal::{
    detect_platform, suggest_reply, CliConfig, NegotiationDraft, Negotiator, SeededRandom,
    ThreadRandom, TomlConfig,
};
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting lowbal CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證設定檔
    let config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path).unwrap_or_else(|e| exit_with(&e))
        }
        None => TomlConfig::default(),
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if let Err(e) = run(&cli.command, &config).await {
        exit_with(&e);
    }

    Ok(())
}

async fn run(command: &Command, config: &TomlConfig) -> lowbal::Result<()> {
    match command {
        Command::Offer(args) => run_offer(args, config).await,
        Command::Reply(args) => run_reply(args),
        Command::Detect { url } => {
            let platform = detect_platform(url)?;
            println!("{}", platform);
            Ok(())
        }
    }
}

async fn run_offer(args: &OfferArgs, config: &TomlConfig) -> lowbal::Result<()> {
    args.validate()?;
    let listing = args.to_listing(config)?;
    let templates = config.template_bank()?;

    let draft = match args.seed {
        Some(seed) => Negotiator::with_random(templates, SeededRandom::new(seed)).draft(&listing)?,
        None => Negotiator::new(templates).draft(&listing)?,
    };

    // 純粹是介面效果，不影響結果
    let delay = args.effective_delay_ms(config);
    if delay > 0 {
        tracing::debug!("Holding result for {}ms", delay);
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    match args.format {
        OutputFormat::Text => print_draft(&draft),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&draft)?),
    }
    Ok(())
}

fn run_reply(args: &ReplyArgs) -> lowbal::Result<()> {
    args.validate()?;
    let reply = match args.seed {
        Some(seed) => suggest_reply(
            &mut SeededRandom::new(seed),
            &args.message,
            args.category.as_deref(),
            args.offer,
        )?,
        None => suggest_reply(
            &mut ThreadRandom,
            &args.message,
            args.category.as_deref(),
            args.offer,
        )?,
    };
    println!("{}", reply);
    Ok(())
}

fn print_draft(draft: &NegotiationDraft) {
    println!("📦 {} ({})", draft.title, draft.platform);
    println!("💰 Asking price:   ${}", draft.original_price);
    println!("🎯 Suggested offer: ${}", draft.offer);
    println!(
        "📉 Potential savings: ${} ({:.0}% off)",
        draft.savings, draft.discount_percent
    );
    println!();
    println!("✉️  {}", draft.message);
}

fn exit_with(e: &NegotiationError) -> ! {
    tracing::error!(
        "❌ Negotiation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
