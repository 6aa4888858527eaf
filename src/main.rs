use logbook_lib::core::settings::resolve_config_path;

#[tokio::main]
async fn main() {
    let config_path = resolve_config_path(std::env::args().nth(1));

    if let Err(e) = logbook_lib::run(&config_path).await {
        eprintln!("[LOGBOOK] {}", e);
        std::process::exit(1);
    }
}
