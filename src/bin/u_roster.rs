//! generates a week of departures for one line and rosters drivers and buses
//! onto it, printing the plan as JSON.
use clap::Parser;
use u_roster::app::RosterApp;

fn main() {
    env_logger::init();
    let app = RosterApp::parse();
    if let Err(e) = app.run() {
        log::error!("{e}");
        eprintln!("u-roster: {e}");
        std::process::exit(1);
    }
}
