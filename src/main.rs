// src/main.rs
use cardrelay::delivery::api_server::run_server;
use cardrelay::Settings;
use env_logger::Env;
use log::info;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "cardrelay")]
struct Opt {
    #[structopt(short, long, default_value = "config.yml")]
    config: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let opt = Opt::from_args();
    let settings = match Settings::load_from_file(&opt.config) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load configuration: {:?}", e);
            std::process::exit(1);
        }
    };

    info!("loaded configuration from {}", opt.config);
    run_server(settings).await
}
