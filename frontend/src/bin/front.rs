use frontend::{config::Config, start};

fn main() {
    console_error_panic_hook::set_once();
    start(Config::load());
}
