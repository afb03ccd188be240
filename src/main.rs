//=========================================================================
// Volley
//=========================================================================
//
// Binary entry point: configure logging, bootstrap the host with the
// stock state set, open a window.
//
//=========================================================================

use log::{error, info};

use volley::{states, GameBuilder};

fn main() {
    env_logger::init();
    info!("volley starting");

    let game = match GameBuilder::new()
        .with_resolution(1024, 768)
        .with_tick_rate(60.0)
        .build(states::standard_states())
    {
        Ok(game) => game,
        Err(e) => {
            error!("invalid state configuration: {}", e);
            eprintln!("volley: invalid state configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = game.run_windowed() {
        error!("platform failure: {}", e);
        eprintln!("volley: {}", e);
        std::process::exit(1);
    }

    info!("volley stopped");
}
