use lbi::commands::Cli;
use lbi::libs::logger;
use lbi::msg_error;
use std::process::exit;

#[tokio::main]
async fn main() {
    logger::init();

    if let Err(e) = Cli::menu().await {
        msg_error!(format!("{:#}", e));
        exit(1);
    }
}
