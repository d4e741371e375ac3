use anyhow::Context;
use clap::Parser;
use payhawk_prinex::core::Storage;
use payhawk_prinex::utils::error::{EtlError, ErrorSeverity};
use payhawk_prinex::utils::{logger, validation::Validate};
use payhawk_prinex::{
    CliConfig, ConversionOutput, ConverterConfig, EtlEngine, LocalStorage, PrinexPipeline,
};

/// Columns shown in the terminal preview; the full rows are available with --preview-json.
const PREVIEW_COLUMNS: [&str; 8] = [
    "ORDEN",
    "NUM.FRA",
    "FECHA.FRA",
    "TIPO.FRA",
    "BASE1",
    "TOTAL",
    "CTA_GASTO",
    "SCTA_GASTO",
];

fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting payhawk-prinex");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let settings = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading settings from: {}", path);
            ConverterConfig::from_file(path)
                .with_context(|| format!("failed to load settings file '{}'", path))?
        }
        None => ConverterConfig::default(),
    };

    // 驗證配置
    if let Err(e) = args.validate().and_then(|_| settings.validate()) {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    let input = LocalStorage::new(".".to_string())
        .read_file(&args.input)
        .with_context(|| format!("failed to read input bundle '{}'", args.input))?;

    let accounting_date = args.accounting_date_or_today();
    tracing::info!("📅 Accounting date: {}", accounting_date);

    let monitor_enabled = args.monitor || settings.monitoring_enabled();
    let pipeline = PrinexPipeline::new(settings, accounting_date);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run(&input) {
        Ok(output) => {
            let storage = LocalStorage::new(args.output_dir.clone());
            storage
                .write_file(&output.bundle_name, &output.bundle_bytes)
                .with_context(|| format!("failed to write output to '{}'", args.output_dir))?;

            print_preview(&output, args.preview_json)?;
            let output_path = std::path::Path::new(&args.output_dir).join(&output.bundle_name);
            tracing::info!("📁 Output saved to: {}", output_path.display());
            println!("✅ Prinex bundle generated: {} records, {} invoices", output.record_count, output.document_count);
            println!("📁 Output saved to: {}", output_path.display());
        }
        Err(e) => {
            tracing::error!(
                "❌ Conversion failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(exit_code(&e));
        }
    }

    Ok(())
}

fn exit_code(error: &EtlError) -> i32 {
    match error.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

fn print_preview(output: &ConversionOutput, as_json: bool) -> anyhow::Result<()> {
    if as_json {
        println!("{}", serde_json::to_string_pretty(&output.preview)?);
        return Ok(());
    }

    println!(
        "Preview ({} of {} rows):",
        output.preview.len(),
        output.record_count
    );
    println!("{}", PREVIEW_COLUMNS.join(" | "));
    for record in &output.preview {
        let cells: Vec<String> = PREVIEW_COLUMNS
            .iter()
            .map(|column| record.get(column).map(ToString::to_string).unwrap_or_default())
            .collect();
        println!("{}", cells.join(" | "));
    }
    Ok(())
}
