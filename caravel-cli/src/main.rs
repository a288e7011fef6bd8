use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use caravel_chat::{ConversationSession, TurnEngine};
use caravel_offer::MockFlightSupplier;
use caravel_store::{Config, JsonBookingStore, TextReceiptRenderer};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "caravel_chat=info,caravel_offer=info,caravel_booking=info,caravel_store=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!(bookings_dir = %config.bookings.dir, "starting Caravel travel assistant");

    let engine = TurnEngine::new(
        Arc::new(MockFlightSupplier::new()),
        Arc::new(JsonBookingStore::new(&config.bookings.dir)),
        Arc::new(TextReceiptRenderer::new(&config.bookings.receipts_dir)),
    )
    .max_message_length(config.chat.max_message_length)
    .max_results(config.supplier.max_results);

    let mut session = ConversationSession::new();

    println!("Caravel travel assistant. Where would you like to fly?");
    println!("(e.g. \"flights from NYC to LAX on June 1\" -- \"quit\" to exit)\n");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if matches!(line.to_lowercase().as_str(), "quit" | "exit") {
            break;
        }

        match engine.handle(&mut session, line).await {
            Ok(reply) => println!("{}\n", reply),
            Err(e) => println!("{}\n", e),
        }
    }

    println!("Safe travels!");
}
