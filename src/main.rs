#[tokio::main]
async fn main() {
    if let Err(err) = apihub::mcp::server::run_stdio().await {
        eprintln!("apihub: {}", err);
        std::process::exit(1);
    }
}
