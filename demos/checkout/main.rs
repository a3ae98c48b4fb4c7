//! Checkout demo: drives the payment form against the simulated gateway
//!
//! Run with `cargo run --example checkout [config.yaml]`.
//! Set `RUST_LOG=payform=debug` to see every field change.

use anyhow::Result;
use payform::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => FormConfig::from_yaml_file(&path)?,
        None => FormConfig::default(),
    };

    let gateway = Arc::new(SimulatedGateway::from_config(&config.simulation));
    let controller = PaymentFormController::new(gateway).with_config(config);

    let mut events = controller.subscribe();
    let listener = tokio::spawn(async move {
        while let Ok(envelope) = events.recv().await {
            println!("  · event {}", envelope.event.name());
        }
    });

    println!("💳 Payform checkout demo\n");

    // A first attempt with mistakes
    controller.on_field_change(PaymentField::CardNumber, "4242 4242").await;
    controller.on_field_change(PaymentField::Cvv, "12").await;
    if let SubmitOutcome::Rejected { errors } = controller.submit().await? {
        println!("❌ Submission rejected:");
        for (field, message) in errors.iter() {
            println!("   {}: {}", field, message);
        }
    }

    // Fix everything
    for (field, raw) in [
        ("cardNumber", "4242424242424242"),
        ("expiryDate", "12/30"),
        ("cvv", "123"),
        ("cardholderName", "Ada Lovelace"),
        ("email", "ada@example.com"),
    ] {
        controller.on_field_change_str(field, raw).await?;
    }

    println!("\n⏳ Submitting...");
    match controller.submit().await? {
        SubmitOutcome::Succeeded(receipt) => {
            println!("✅ Payment of ${} succeeded", receipt.amount);
            println!("   Transaction ID: {}", receipt.transaction_id);
            println!(
                "   Method: {} ending in {}",
                receipt.method_label, receipt.last_four
            );
            controller.reset().await?;
        }
        SubmitOutcome::Failed(failure) => {
            println!("⚠️  Payment failed ({:?})", failure.reason);
            println!("   Error Code: {}", failure.error_code);
            controller.retry().await?;
        }
        other => println!("Unexpected outcome: {:?}", other),
    }

    let state = controller.snapshot().await;
    println!("\n📋 Final form state:\n{}", serde_json::to_string_pretty(&state)?);

    drop(controller);
    listener.abort();
    Ok(())
}
