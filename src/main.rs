use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = routetrie::cli::Cli::parse();
    if let Err(e) = routetrie::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
