mod app;
mod cli;

use std::fs::File;

use clap::Parser;
use log::{error, info};
use macroquad::prelude::*;
use simplelog::{Config, WriteLogger};

use snake_arcade::game::grid::{SCREEN_HEIGHT, SCREEN_WIDTH};

use crate::cli::Cli;

fn window_conf() -> Conf {
    Conf {
        window_title: "Snake Game".to_owned(),
        window_width: SCREEN_WIDTH,
        window_height: SCREEN_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let cli = Cli::parse();

    match File::create(&cli.log_file) {
        Ok(file) => {
            if let Err(err) = WriteLogger::init(cli.log_level, Config::default(), file) {
                eprintln!("Logger already set: {err}");
            }
        }
        Err(err) => eprintln!("Could not open log file {}: {err}", cli.log_file.display()),
    }
    info!("snake_arcade {} starting", env!("CARGO_PKG_VERSION"));

    if let Err(err) = app::run(cli).await {
        error!("fatal: {err:#}");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
