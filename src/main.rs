use anyhow::Context;
use clap::Parser;
use plan_pricing::utils::error::ErrorSeverity;
use plan_pricing::utils::{logger, validation::Validate};
use plan_pricing::{
    quote_catalog, CatalogConfig, CliConfig, Currency, DiscountCodeSource, PricingError,
    QuoteRequest, SessionDiscountCode,
};

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,      // 警告，但成功
        ErrorSeverity::Medium => 2,   // 部分報價失敗
        ErrorSeverity::High => 1,     // 目錄或參數錯誤
        ErrorSeverity::Critical => 3, // 系統錯誤
    }
}

fn fail(e: &PricingError) -> ! {
    tracing::error!(
        "❌ Pricing failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e.severity()).max(1));
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting plan-pricing");
    tracing::debug!("CLI config: {:?}", config);

    let catalog = CatalogConfig::from_file(&config.catalog).unwrap_or_else(|e| fail(&e));
    if let Err(e) = catalog.validate() {
        fail(&e);
    }
    tracing::info!("📁 Catalog loaded from: {}", config.catalog);

    let currency = match config.currency.as_deref().map(str::parse::<Currency>) {
        Some(Ok(currency)) => Some(currency),
        Some(Err(e)) => fail(&e),
        None => None,
    };

    let session = match (&config.discount_code, config.no_session) {
        (_, true) => None,
        (Some(code), false) => Some(SessionDiscountCode::with_code(code.clone())),
        (None, false) => Some(catalog.session()),
    };
    match &session {
        Some(session) => tracing::info!("🎟️ Session discount code: {:?}", session.code()),
        None => tracing::info!("🎟️ Pricing without a discount code source"),
    }
    let source = session.as_ref().map(|s| s as &dyn DiscountCodeSource);

    let request = QuoteRequest {
        plan: config.plan.clone(),
        currency,
    };
    let report = quote_catalog(&catalog, &request, source).unwrap_or_else(|e| fail(&e));
    if report.is_empty() {
        tracing::warn!("🔶 Nothing to quote: the catalog declares no plans");
    }

    let output = report
        .render(config.format)
        .with_context(|| format!("rendering quotes as {:?}", config.format))?;
    println!("{}", output);

    if let Some(severity) = report.worst_severity() {
        let code = exit_code(severity);
        if code > 0 {
            std::process::exit(code);
        }
    }

    Ok(())
}
