//! # Package Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del repositorio de paquetes. Ctrl-C detiene el accept
//! loop y el proceso sale con código 0.

use pkg_server::config::Config;
use pkg_server::logging::init_tracing;
use pkg_server::router::Router;
use pkg_server::server::Server;
use pkg_server::Result;

fn main() {
    let config = Config::new();

    if let Err(e) = init_tracing(&config.log_level) {
        eprintln!("Error al inicializar logging: {}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(config) {
        tracing::error!(code = e.code(), "error fatal: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;
    config.print_summary();

    let router = Router::from_config(&config)?;
    let server = Server::bind(&config, router)?;

    let handle = server.shutdown_handle()?;
    ctrlc::set_handler(move || handle.trigger())?;

    tracing::info!("package repo listening on {}", server.local_addr()?.port());
    server.run()
}
