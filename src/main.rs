use landing_scripts::{config, web};
use log::{error, info};

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting landing page scripts");
    if let Err(err) = web::run() {
        error!("Landing page scripts did not start: {}", err);
    }
}
