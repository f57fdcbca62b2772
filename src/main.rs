fn main() {
    env_logger::init();
    log::info!("A3144 Simulator - host");
    a3144_sim::mock::run_interactive_terminal();
}
